use std::collections::BTreeMap;
use std::str::FromStr;

use crate::foundation::core::FrameRange;
use crate::foundation::error::{SlateError, SlateResult};

/// Placeholder that drawtext expands to the current frame number.
pub const FRAME_PLACEHOLDER: &str = "%{n}";

/// Named piece of shot metadata that can be burned into a slate slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ShotField {
    /// Project name, taken from the directory after `show`.
    #[serde(rename = "project")]
    Project,
    /// Shot code, e.g. `CYR_0100`.
    #[serde(rename = "shot")]
    Shot,
    /// Task name, upper-cased.
    #[serde(rename = "task")]
    Task,
    /// Version token, e.g. `v003`.
    #[serde(rename = "version")]
    Version,
    /// Live frame counter followed by the frame range.
    #[serde(rename = "timecode&frame")]
    TimecodeFrame,
    /// Date the metadata was extracted.
    #[serde(rename = "date")]
    Date,
}

impl ShotField {
    /// All fields in display order.
    pub const ALL: [ShotField; 6] = [
        ShotField::Project,
        ShotField::Shot,
        ShotField::Task,
        ShotField::Version,
        ShotField::TimecodeFrame,
        ShotField::Date,
    ];

    /// Field name as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            ShotField::Project => "project",
            ShotField::Shot => "shot",
            ShotField::Task => "task",
            ShotField::Version => "version",
            ShotField::TimecodeFrame => "timecode&frame",
            ShotField::Date => "date",
        }
    }
}

impl std::fmt::Display for ShotField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShotField {
    type Err = SlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShotField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                SlateError::validation(format!(
                    "unknown shot field '{s}' (expected one of: {})",
                    ShotField::ALL.map(ShotField::name).join(", ")
                ))
            })
    }
}

/// Field values extracted from one input.
///
/// Every [`ShotField`] has a value; construction goes through [`ShotMetadata::new`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShotMetadata {
    values: BTreeMap<ShotField, String>,
}

/// Parsed pieces of a shot file name, `<seq>_<shot>_<task>_<version>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShotName {
    /// First two tokens joined with `_`.
    pub shot: String,
    /// Third token, upper-cased.
    pub task: String,
    /// Fourth token.
    pub version: String,
}

impl ShotName {
    /// Parse a base name (file name without frame token or extension).
    pub fn parse(base: &str) -> SlateResult<Self> {
        let tokens: Vec<&str> = base.split('_').collect();
        if tokens.len() < 4 || tokens[..4].iter().any(|t| t.is_empty()) {
            return Err(SlateError::invalid_path(format!(
                "file name '{base}' does not follow <seq>_<shot>_<task>_<version>"
            )));
        }
        Ok(Self {
            shot: format!("{}_{}", tokens[0], tokens[1]),
            task: tokens[2].to_uppercase(),
            version: tokens[3].to_string(),
        })
    }
}

impl ShotMetadata {
    /// Assemble metadata for a shot.
    pub fn new(
        project: &str,
        name: &ShotName,
        range: FrameRange,
        date: chrono::NaiveDate,
    ) -> Self {
        let mut values = BTreeMap::new();
        values.insert(ShotField::Project, project.to_uppercase());
        values.insert(ShotField::Shot, name.shot.clone());
        values.insert(ShotField::Task, name.task.clone());
        values.insert(ShotField::Version, name.version.clone());
        values.insert(ShotField::TimecodeFrame, timecode_template(range));
        values.insert(ShotField::Date, date.format("%Y-%m-%d").to_string());
        Self { values }
    }

    /// Value of `field`.
    pub fn get(&self, field: ShotField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Iterate `(field, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ShotField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// `%{n}/<first>-<last>`: live frame number followed by the static range.
pub fn timecode_template(range: FrameRange) -> String {
    format!("{FRAME_PLACEHOLDER}/{}-{}", range.first, range.last)
}

#[cfg(test)]
#[path = "../../tests/unit/shot/metadata.rs"]
mod tests;
