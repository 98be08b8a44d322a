use crate::foundation::error::{SlateError, SlateResult};

/// First frame number assigned to single-file video inputs.
pub const VIDEO_FIRST_FRAME: u64 = 1001;

/// Inclusive frame range `[first, last]` of a renderable input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame number (inclusive).
    pub first: u64,
    /// Last frame number (inclusive).
    pub last: u64,
}

impl FrameRange {
    /// Create a validated range with `1 <= first <= last`.
    pub fn new(first: u64, last: u64) -> SlateResult<Self> {
        if first == 0 {
            return Err(SlateError::validation("FrameRange first must be >= 1"));
        }
        if first > last {
            return Err(SlateError::validation(format!(
                "FrameRange first ({first}) must be <= last ({last})"
            )));
        }
        Ok(Self { first, last })
    }

    /// Range of a video holding `frame_count` frames, numbered from [`VIDEO_FIRST_FRAME`].
    pub fn for_video(frame_count: u64) -> SlateResult<Self> {
        if frame_count == 0 {
            return Err(SlateError::probe("video reports zero frames"));
        }
        Self::new(VIDEO_FIRST_FRAME, VIDEO_FIRST_FRAME - 1 + frame_count)
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.last - self.first + 1
    }

    /// Return `true` when the range covers exactly one frame.
    pub fn is_single_frame(self) -> bool {
        self.first == self.last
    }

    /// Return `true` when `frame` is inside `[first, last]`.
    pub fn contains(self, frame: u64) -> bool {
        self.first <= frame && frame <= self.last
    }
}

impl std::fmt::Display for FrameRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
