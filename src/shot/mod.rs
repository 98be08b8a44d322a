//! Shot metadata derived from an input path.
//!
//! Inputs live under `/show/<project>/...` and are named `<seq>_<shot>_<task>_<version>`,
//! optionally followed by a 4-digit frame token for image sequences.

/// Path parsing and frame-range detection.
pub mod extract;
/// Field names and values burned into the slate.
pub mod metadata;
/// Frame counting for video containers.
pub mod probe;
/// Image sequence discovery on disk.
pub mod sequence;
