//! `-vf` filter graph synthesis: padding bars and per-slot `drawtext` filters.

/// Builds the complete filter chain.
pub mod builder;
/// ffmpeg escaping levels and shell quoting.
pub mod escape;
/// Slots, bands and their geometry.
pub mod layout;
