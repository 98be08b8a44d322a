//! ffslate burns a shot-information slate onto image sequences and video clips with `ffmpeg`.
//!
//! The flow is session-oriented:
//!
//! - Open a [`SlateSession`] on a file under `/show/<project>/...`; this extracts
//!   [`ShotMetadata`] and the [`FrameRange`]
//! - Build a [`RenderConfig`] (font, padding, [`SlotAssignment`], output)
//! - Start the render and consume [`RenderEvent`]s from the returned [`RenderHandle`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Render parameters.
pub mod config;
/// Encoder command assembly and supervision.
pub mod encode;
/// Filter graph synthesis.
pub mod graph;
/// Session tying an input to its supervisor.
pub mod session;
/// Shot metadata extraction.
pub mod shot;

pub use crate::foundation::core::{FrameRange, VIDEO_FIRST_FRAME};
pub use crate::foundation::error::{SlateError, SlateResult};

pub use crate::config::{EncoderTools, OutputExtension, RenderConfig};
pub use crate::encode::command::{CommandAssembler, SlateCommand};
pub use crate::encode::events::{RenderEvent, RenderOutcome, RenderState};
pub use crate::encode::supervisor::{RenderHandle, RenderSupervisor};
pub use crate::graph::builder::{FilterGraph, FilterGraphBuilder};
pub use crate::graph::layout::{SlateLayout, Slot, SlotAssignment};
pub use crate::session::SlateSession;
pub use crate::shot::extract::{InputKind, PathMetadataExtractor, PreparedInput};
pub use crate::shot::metadata::{ShotField, ShotMetadata};
pub use crate::shot::probe::{FfprobeFrameCounter, FrameCounter};
