use std::path::{Path, PathBuf};

use crate::config::{EncoderTools, RenderConfig};
use crate::encode::command::{CommandAssembler, SlateCommand};
use crate::encode::events::RenderState;
use crate::encode::supervisor::{RenderHandle, RenderSupervisor};
use crate::foundation::core::FrameRange;
use crate::foundation::error::SlateResult;
use crate::shot::extract::{PathMetadataExtractor, PreparedInput};
use crate::shot::metadata::ShotMetadata;
use crate::shot::probe::{FfprobeFrameCounter, FrameCounter};

/// One selected input and the supervisor that renders it.
///
/// The prepared metadata is fixed for the session; each render takes a fresh [`RenderConfig`].
#[derive(Debug)]
pub struct SlateSession {
    input: PreparedInput,
    assembler: CommandAssembler,
    supervisor: RenderSupervisor,
}

impl SlateSession {
    /// Prepare `path` using `tools` for probing and encoding.
    pub fn open(path: &Path, tools: &EncoderTools) -> SlateResult<Self> {
        let extractor = PathMetadataExtractor::new(FfprobeFrameCounter::new(&tools.ffprobe));
        Self::open_with(path, &extractor, tools.ffmpeg.clone())
    }

    /// Prepare `path` with a caller-supplied extractor.
    pub fn open_with<C: FrameCounter>(
        path: &Path,
        extractor: &PathMetadataExtractor<C>,
        ffmpeg: impl Into<PathBuf>,
    ) -> SlateResult<Self> {
        Ok(Self::from_prepared(extractor.extract(path)?, ffmpeg))
    }

    /// Wrap an already prepared input.
    pub fn from_prepared(input: PreparedInput, ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            input,
            assembler: CommandAssembler::new(ffmpeg),
            supervisor: RenderSupervisor::new(),
        }
    }

    /// Prepared input.
    pub fn input(&self) -> &PreparedInput {
        &self.input
    }

    /// Extracted slate fields.
    pub fn metadata(&self) -> &ShotMetadata {
        &self.input.metadata
    }

    /// Frames that will be rendered.
    pub fn frame_range(&self) -> FrameRange {
        self.input.frame_range
    }

    /// Render defaults for this input.
    pub fn default_config(&self, font_path: impl Into<PathBuf>) -> RenderConfig {
        RenderConfig::for_input(&self.input, font_path)
    }

    /// Encoder command for `config`, without running it.
    pub fn command(&self, config: &RenderConfig) -> SlateResult<SlateCommand> {
        self.assembler.assemble(
            config,
            self.input.kind,
            self.input.frame_range,
            &self.input.metadata,
        )
    }

    /// Assemble and start a render.
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(&self, config: &RenderConfig) -> SlateResult<RenderHandle> {
        let command = self.command(config)?;
        self.supervisor.start(command, self.input.frame_range)
    }

    /// State of the most recent render.
    pub fn render_state(&self) -> RenderState {
        self.supervisor.state()
    }

    /// The session's supervisor.
    pub fn supervisor(&self) -> &RenderSupervisor {
        &self.supervisor
    }
}
