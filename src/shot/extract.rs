use std::path::{Component, Path, PathBuf};

use crate::foundation::core::FrameRange;
use crate::foundation::error::{SlateError, SlateResult};
use crate::shot::metadata::{ShotMetadata, ShotName};
use crate::shot::probe::FrameCounter;
use crate::shot::sequence::{scan_sequence, sequence_pattern};

/// Path component that precedes the project directory.
pub const ROOT_MARKER: &str = "show";
/// Still-image extensions rendered as numbered sequences.
pub const SEQUENCE_EXTENSIONS: [&str; 2] = ["png", "exr"];
/// Single-file video container extension.
pub const VIDEO_EXTENSION: &str = "mov";

/// How the encoder reads the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Numbered still images addressed through a `%04d` pattern.
    Sequence,
    /// One video container.
    Video,
}

/// Everything derived from one selected input file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PreparedInput {
    /// Path the user selected.
    pub source_path: PathBuf,
    /// Path handed to the encoder's `-i`; a `%04d` pattern for sequences.
    pub encoder_input: PathBuf,
    /// Sequence or video.
    pub kind: InputKind,
    /// Renderable frames.
    pub frame_range: FrameRange,
    /// Slate field values.
    pub metadata: ShotMetadata,
    /// `<dir>/<base>_slate`, without extension.
    pub default_output_stem: PathBuf,
}

/// Turns a selected file path into [`PreparedInput`].
pub struct PathMetadataExtractor<C> {
    counter: C,
    date: Option<chrono::NaiveDate>,
}

impl<C: FrameCounter> PathMetadataExtractor<C> {
    /// Create an extractor probing videos with `counter`.
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            date: None,
        }
    }

    /// Pin the `date` field instead of using today's local date.
    pub fn with_date(mut self, date: chrono::NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Parse `path` and detect its frame range.
    pub fn extract(&self, path: &Path) -> SlateResult<PreparedInput> {
        let project = project_from_path(path)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SlateError::invalid_path(format!("'{}' has no UTF-8 file name", path.display()))
            })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                SlateError::invalid_path(format!("'{}' has no file extension", path.display()))
            })?;
        let base = file_name.split('.').next().unwrap_or(file_name);
        let name = ShotName::parse(base)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let lower_ext = ext.to_ascii_lowercase();
        let (kind, encoder_input, frame_range) =
            if SEQUENCE_EXTENSIONS.contains(&lower_ext.as_str()) {
                let seq = scan_sequence(dir, base, ext)?;
                (
                    InputKind::Sequence,
                    sequence_pattern(dir, base, ext),
                    seq.range,
                )
            } else if lower_ext == VIDEO_EXTENSION {
                let count = self.counter.count_frames(path)?;
                (
                    InputKind::Video,
                    path.to_path_buf(),
                    FrameRange::for_video(count)?,
                )
            } else {
                return Err(SlateError::invalid_path(format!(
                    "unsupported extension '.{ext}' (expected .{}, .{} or .{VIDEO_EXTENSION})",
                    SEQUENCE_EXTENSIONS[0], SEQUENCE_EXTENSIONS[1]
                )));
            };

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let metadata = ShotMetadata::new(&project, &name, frame_range, date);

        tracing::info!(
            path = %path.display(),
            ?kind,
            range = %frame_range,
            "extracted shot metadata"
        );

        Ok(PreparedInput {
            source_path: path.to_path_buf(),
            encoder_input,
            kind,
            frame_range,
            metadata,
            default_output_stem: dir.join(format!("{base}_slate")),
        })
    }
}

/// Project directory name following the `show` component.
pub fn project_from_path(path: &Path) -> SlateResult<String> {
    let components: Vec<Component<'_>> = path.components().collect();
    // The project must be a directory, so the file name itself never counts.
    let dirs = &components[..components.len().saturating_sub(1)];
    dirs.windows(2)
        .find_map(|w| match (w[0], w[1]) {
            (Component::Normal(marker), Component::Normal(project)) if marker == ROOT_MARKER => {
                project.to_str().map(str::to_string)
            }
            _ => None,
        })
        .ok_or_else(|| {
            SlateError::invalid_path(format!(
                "'{}' is not under a /{ROOT_MARKER}/<project>/ directory",
                path.display()
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/shot/extract.rs"]
mod tests;
