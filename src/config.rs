use std::path::PathBuf;
use std::str::FromStr;

use crate::foundation::error::{SlateError, SlateResult};
use crate::graph::layout::{SlateLayout, SlotAssignment, validate_padding};
use crate::shot::extract::PreparedInput;

/// Default text size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 24;
/// Default bar height as a fraction of frame height.
pub const DEFAULT_PADDING: f64 = 0.1;
/// Default input rate for image sequences.
pub const DEFAULT_FRAMERATE: u32 = 24;

/// Container of the rendered slate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputExtension {
    /// QuickTime `.mov`.
    #[default]
    Mov,
    /// MPEG-4 `.mp4`.
    Mp4,
}

impl OutputExtension {
    /// Extension including the leading dot.
    pub fn dotted(self) -> &'static str {
        match self {
            OutputExtension::Mov => ".mov",
            OutputExtension::Mp4 => ".mp4",
        }
    }
}

impl FromStr for OutputExtension {
    type Err = SlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mov" => Ok(OutputExtension::Mov),
            "mp4" => Ok(OutputExtension::Mp4),
            _ => Err(SlateError::validation(format!(
                "unsupported output extension '{s}' (expected mov or mp4)"
            ))),
        }
    }
}

/// External executables the crate shells out to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncoderTools {
    /// Encoder executable.
    pub ffmpeg: PathBuf,
    /// Prober executable.
    pub ffprobe: PathBuf,
}

impl Default for EncoderTools {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Parameters of one render invocation.
///
/// Built fresh for every render and not modified once the render starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Path handed to the encoder's `-i`.
    pub input_path: PathBuf,
    /// Output path without extension.
    pub output_path_stem: Option<PathBuf>,
    /// Output container.
    pub output_extension: Option<OutputExtension>,
    /// Font file used by every text slot.
    pub font_path: PathBuf,
    /// Text size in pixels.
    pub font_size: u32,
    /// Fraction of frame height covered by each bar, in `[0, 0.5)`.
    pub padding_fraction: f64,
    /// Fields shown per slot.
    pub slot_assignment: SlotAssignment,
    /// Input frame rate declared for image sequences.
    pub framerate: u32,
}

impl RenderConfig {
    /// Defaults for a prepared input, writing next to the source.
    pub fn for_input(input: &PreparedInput, font_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input.encoder_input.clone(),
            output_path_stem: Some(input.default_output_stem.clone()),
            output_extension: Some(OutputExtension::default()),
            font_path: font_path.into(),
            font_size: DEFAULT_FONT_SIZE,
            padding_fraction: DEFAULT_PADDING,
            slot_assignment: SlotAssignment::standard(),
            framerate: DEFAULT_FRAMERATE,
        }
    }

    /// Set the output stem.
    pub fn with_output_stem(mut self, stem: impl Into<PathBuf>) -> Self {
        self.output_path_stem = Some(stem.into());
        self
    }

    /// Set the output container.
    pub fn with_extension(mut self, ext: OutputExtension) -> Self {
        self.output_extension = Some(ext);
        self
    }

    /// Set the text size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the bar height fraction.
    pub fn with_padding(mut self, padding_fraction: f64) -> Self {
        self.padding_fraction = padding_fraction;
        self
    }

    /// Replace the slot assignment.
    pub fn with_slots(mut self, slots: SlotAssignment) -> Self {
        self.slot_assignment = slots;
        self
    }

    /// Set the sequence frame rate.
    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    /// Check ranges that do not depend on the output path.
    pub fn validate(&self) -> SlateResult<()> {
        validate_padding(self.padding_fraction)?;
        if self.font_size == 0 {
            return Err(SlateError::validation("font size must be > 0"));
        }
        if self.framerate == 0 {
            return Err(SlateError::validation("framerate must be > 0"));
        }
        Ok(())
    }

    /// Padding and text geometry.
    pub fn layout(&self) -> SlateResult<SlateLayout> {
        SlateLayout::new(self.padding_fraction, self.font_size)
    }

    /// `<stem><ext>`, or [`SlateError::MissingOutputPath`] when either part is unset.
    pub fn output_path(&self) -> SlateResult<PathBuf> {
        let stem = self
            .output_path_stem
            .as_ref()
            .filter(|s| !s.as_os_str().is_empty())
            .ok_or_else(|| SlateError::missing_output_path("output path stem is not set"))?;
        let ext = self
            .output_extension
            .ok_or_else(|| SlateError::missing_output_path("output extension is not set"))?;
        let mut out = stem.clone().into_os_string();
        out.push(ext.dotted());
        Ok(PathBuf::from(out))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
