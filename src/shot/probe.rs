use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::error::{SlateError, SlateResult};

/// Source of total frame counts for single-file video inputs.
pub trait FrameCounter {
    /// Return the number of video frames in `path`.
    fn count_frames(&self, path: &Path) -> SlateResult<u64>;
}

/// [`FrameCounter`] backed by the system `ffprobe`.
///
/// Reads the container's `nb_frames` first and only decodes the stream (`-count_frames`)
/// when the container does not store a count.
#[derive(Clone, Debug)]
pub struct FfprobeFrameCounter {
    program: PathBuf,
}

impl FfprobeFrameCounter {
    /// Use `program` as the ffprobe executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn query(&self, path: &Path, decode: bool) -> SlateResult<Option<u64>> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            nb_frames: Option<String>,
            nb_read_frames: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(["-v", "error", "-select_streams", "v:0"]);
        if decode {
            cmd.args(["-count_frames", "-show_entries", "stream=nb_read_frames"]);
        } else {
            cmd.args(["-show_entries", "stream=nb_frames"]);
        }
        cmd.args(["-of", "json"]).arg(path);
        tracing::debug!(?cmd, "probing frame count");

        let out = cmd.output().map_err(|e| {
            SlateError::probe(format!(
                "failed to run '{}' (is it installed and on PATH?): {e}",
                self.program.display()
            ))
        })?;
        if !out.status.success() {
            return Err(SlateError::probe(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
            .map_err(|e| SlateError::probe(format!("ffprobe json parse failed: {e}")))?;
        let stream = parsed.streams.into_iter().next().ok_or_else(|| {
            SlateError::probe(format!("no video stream found in '{}'", path.display()))
        })?;
        let raw = if decode {
            stream.nb_read_frames
        } else {
            stream.nb_frames
        };
        Ok(parse_frame_count(raw.as_deref()))
    }
}

impl Default for FfprobeFrameCounter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FrameCounter for FfprobeFrameCounter {
    #[tracing::instrument(skip(self))]
    fn count_frames(&self, path: &Path) -> SlateResult<u64> {
        if let Some(n) = self.query(path, false)? {
            return Ok(n);
        }
        self.query(path, true)?.ok_or_else(|| {
            SlateError::probe(format!(
                "could not determine frame count of '{}'",
                path.display()
            ))
        })
    }
}

/// Parse an ffprobe frame count field; `N/A`, empty and zero mean "unknown".
pub(crate) fn parse_frame_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "../../tests/unit/shot/probe.rs"]
mod tests;
