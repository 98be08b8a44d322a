//! Encoder invocation and supervision.
//!
//! The command is assembled as a plain argument list and run without a shell. While it runs,
//! its merged output is parsed for `frame=` stats lines and turned into ordered
//! [`events::RenderEvent`]s.

/// ffmpeg argument assembly.
pub mod command;
/// Events and states shared with the presentation side.
pub mod events;
/// Stats-line parsing and percentage bookkeeping.
pub mod progress;
/// Child-process lifecycle and event publishing.
pub mod supervisor;
