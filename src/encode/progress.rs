use std::collections::VecDeque;

use crate::foundation::core::FrameRange;

/// Prefix of ffmpeg's periodic stats line (`frame=  75 fps=...`).
pub const FRAME_MARKER: &str = "frame=";

/// Frame number reported by a stats line, or `None` for any other line.
pub fn parse_frame_marker(line: &str) -> Option<u64> {
    let rest = line.strip_prefix(FRAME_MARKER)?.trim_start();
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    digits.parse().ok()
}

/// `floor(frame * 100 / len)`, capped at 100.
///
/// A single-frame range is complete as soon as any frame is reported.
pub fn percent_for_frame(frame: u64, range: FrameRange) -> u8 {
    let total = range.len_frames();
    if total <= 1 {
        return 100;
    }
    let pct = u128::from(frame) * 100 / u128::from(total);
    pct.min(100) as u8
}

/// Per-job percentage state; published values never decrease.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    range: FrameRange,
    last: Option<u8>,
}

impl ProgressTracker {
    /// Track progress over `range`.
    pub fn new(range: FrameRange) -> Self {
        Self { range, last: None }
    }

    /// Percentage to publish for `line`, if it is a stats line.
    pub fn observe_line(&mut self, line: &str) -> Option<u8> {
        let frame = parse_frame_marker(line)?;
        let pct = percent_for_frame(frame, self.range);
        let pct = self.last.map_or(pct, |last| last.max(pct));
        self.last = Some(pct);
        Some(pct)
    }

    /// Last published percentage.
    pub fn last(&self) -> Option<u8> {
        self.last
    }

    /// Force the value to 100; `true` when 100 had not been published yet.
    pub fn finish(&mut self) -> bool {
        let was_complete = self.last == Some(100);
        self.last = Some(100);
        !was_complete
    }
}

/// Splits a byte stream into lines on `\n` or `\r`.
///
/// ffmpeg rewrites its stats line in place with `\r`, so both count as terminators. Empty lines
/// are dropped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Feed a chunk, returning every line it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &b in chunk {
            if b == b'\n' || b == b'\r' {
                self.flush_into(&mut lines);
            } else {
                self.pending.push(b);
            }
        }
        lines
    }

    /// Trailing text without a terminator, at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        self.flush_into(&mut lines);
        lines.pop()
    }

    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if self.pending.is_empty() {
            return;
        }
        lines.push(String::from_utf8_lossy(&self.pending).into_owned());
        self.pending.clear();
    }
}

/// Ring buffer of the most recent output lines, attached to failure events.
#[derive(Clone, Debug)]
pub struct OutputTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl OutputTail {
    /// Keep at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Remember `line`, evicting the oldest when full.
    pub fn push(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    /// Remembered lines joined with newlines.
    pub fn joined(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/progress.rs"]
mod tests;
