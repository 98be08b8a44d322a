use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameRange;
use crate::foundation::error::{SlateError, SlateResult};

/// Number of digits in a sequence frame token (`name.0150.exr`).
pub const FRAME_TOKEN_DIGITS: usize = 4;

/// Frames of an image sequence found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceFrames {
    /// Frame numbers in ascending order.
    pub frames: Vec<u64>,
    /// Range spanned by the first and last frame.
    pub range: FrameRange,
}

impl SequenceFrames {
    /// Frame numbers inside `range` that have no file on disk.
    pub fn missing_frames(&self) -> Vec<u64> {
        let mut missing = Vec::new();
        let mut present = self
            .frames
            .iter()
            .copied()
            .filter(|f| *f >= self.range.first)
            .peekable();
        for f in self.range.first..=self.range.last {
            if present.peek() == Some(&f) {
                present.next();
            } else {
                missing.push(f);
            }
        }
        missing
    }
}

/// Extract the frame token from `<base>.<dddd>.<ext>`.
pub fn frame_token<'a>(file_name: &'a str, base: &str, ext: &str) -> Option<&'a str> {
    let token = file_name
        .strip_prefix(base)?
        .strip_prefix('.')?
        .strip_suffix(ext)?
        .strip_suffix('.')?;
    (token.len() == FRAME_TOKEN_DIGITS && token.bytes().all(|b| b.is_ascii_digit()))
        .then_some(token)
}

/// List the sibling frames of `<dir>/<base>.<dddd>.<ext>`.
///
/// The returned range is gap-free: every frame in it names an existing file. Sequences with
/// holes are rejected with [`SlateError::InvalidPath`]; a `0000` file is ignored.
pub fn scan_sequence(dir: &Path, base: &str, ext: &str) -> SlateResult<SequenceFrames> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list sequence directory '{}'", dir.display()))?;

    let mut tokens = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(token) = frame_token(name, base, ext) {
            tokens.push(token.to_string());
        }
    }

    // Fixed-width tokens: lexical order is numeric order.
    tokens.sort();
    let mut frames: Vec<u64> = tokens.iter().filter_map(|t| t.parse().ok()).collect();

    // Frame numbers start at 1; a `0000` file cannot seed `-start_number`.
    let skipped_zero = frames.first() == Some(&0);
    frames.retain(|f| *f >= 1);
    if skipped_zero {
        tracing::debug!(dir = %dir.display(), base, "ignoring frame 0000");
    }

    let (Some(&first), Some(&last)) = (frames.first(), frames.last()) else {
        let only_zero = if skipped_zero {
            " (frame 0000 alone is not renderable)"
        } else {
            ""
        };
        return Err(SlateError::empty_sequence(format!(
            "no frames matching '{base}.{}.{ext}' in '{}'{only_zero}",
            "#".repeat(FRAME_TOKEN_DIGITS),
            dir.display()
        )));
    };

    let seq = SequenceFrames {
        frames,
        range: FrameRange::new(first, last)?,
    };
    // The encoder stops cleanly at the first hole, so a gapped range would truncate silently.
    let missing = seq.missing_frames();
    if !missing.is_empty() {
        return Err(SlateError::invalid_path(format!(
            "sequence '{base}.{}.{ext}' spans {} but is missing {} frame(s): {}",
            "#".repeat(FRAME_TOKEN_DIGITS),
            seq.range,
            missing.len(),
            describe_frames(&missing)
        )));
    }

    Ok(seq)
}

fn describe_frames(frames: &[u64]) -> String {
    const SHOWN: usize = 10;
    let mut listed = frames
        .iter()
        .take(SHOWN)
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if frames.len() > SHOWN {
        listed.push_str(&format!(" and {} more", frames.len() - SHOWN));
    }
    listed
}

/// printf-style path addressing every frame: `<dir>/<base>.%04d.<ext>`.
pub fn sequence_pattern(dir: &Path, base: &str, ext: &str) -> PathBuf {
    dir.join(format!("{base}.%0{FRAME_TOKEN_DIGITS}d.{ext}"))
}

/// Substitute `frame` into a pattern produced by [`sequence_pattern`].
pub fn expand_pattern(pattern: &str, frame: u64) -> String {
    pattern.replacen(
        &format!("%0{FRAME_TOKEN_DIGITS}d"),
        &format!("{frame:0width$}", width = FRAME_TOKEN_DIGITS),
        1,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shot/sequence.rs"]
mod tests;
