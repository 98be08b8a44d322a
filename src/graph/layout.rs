use std::collections::BTreeMap;
use std::str::FromStr;

use crate::foundation::error::{SlateError, SlateResult};
use crate::shot::metadata::ShotField;

/// Distance of left-aligned text from the frame edge, in pixels.
pub const LEFT_MARGIN_PX: u32 = 10;

/// One of the six text positions on the slate.
///
/// Declaration order is draw order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Top band, left edge.
    TopLeft,
    /// Top band, centered.
    TopCenter,
    /// Top band, right edge.
    TopRight,
    /// Bottom band, left edge.
    BottomLeft,
    /// Bottom band, centered.
    BottomCenter,
    /// Bottom band, right edge.
    BottomRight,
}

/// Padding band a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Bar at the top of the frame.
    Top,
    /// Bar at the bottom of the frame.
    Bottom,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    /// [`LEFT_MARGIN_PX`] from the left edge.
    Left,
    /// Centered on the text width.
    Center,
    /// Flush with the right edge.
    Right,
}

impl Slot {
    /// All slots in draw order.
    pub const ALL: [Slot; 6] = [
        Slot::TopLeft,
        Slot::TopCenter,
        Slot::TopRight,
        Slot::BottomLeft,
        Slot::BottomCenter,
        Slot::BottomRight,
    ];

    /// Identifier used on the command line and in serialized assignments.
    pub fn name(self) -> &'static str {
        match self {
            Slot::TopLeft => "top_left",
            Slot::TopCenter => "top_center",
            Slot::TopRight => "top_right",
            Slot::BottomLeft => "bottom_left",
            Slot::BottomCenter => "bottom_center",
            Slot::BottomRight => "bottom_right",
        }
    }

    /// Band the slot sits in.
    pub fn band(self) -> Band {
        match self {
            Slot::TopLeft | Slot::TopCenter | Slot::TopRight => Band::Top,
            Slot::BottomLeft | Slot::BottomCenter | Slot::BottomRight => Band::Bottom,
        }
    }

    /// Horizontal alignment of the slot.
    pub fn align(self) -> HAlign {
        match self {
            Slot::TopLeft | Slot::BottomLeft => HAlign::Left,
            Slot::TopCenter | Slot::BottomCenter => HAlign::Center,
            Slot::TopRight | Slot::BottomRight => HAlign::Right,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = SlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| {
                SlateError::validation(format!(
                    "unknown slot '{s}' (expected one of: {})",
                    Slot::ALL.map(Slot::name).join(", ")
                ))
            })
    }
}

/// Which field, if any, each slot shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotAssignment {
    slots: BTreeMap<Slot, ShotField>,
}

impl SlotAssignment {
    /// Every slot empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Project, shot and date on top; task, version and frame counter below.
    pub fn standard() -> Self {
        Self::empty()
            .with(Slot::TopLeft, ShotField::Project)
            .with(Slot::TopCenter, ShotField::Shot)
            .with(Slot::TopRight, ShotField::Date)
            .with(Slot::BottomLeft, ShotField::Task)
            .with(Slot::BottomCenter, ShotField::Version)
            .with(Slot::BottomRight, ShotField::TimecodeFrame)
    }

    /// Builder form of [`SlotAssignment::assign`].
    pub fn with(mut self, slot: Slot, field: ShotField) -> Self {
        self.assign(slot, Some(field));
        self
    }

    /// Show `field` in `slot`, or clear the slot with `None`.
    pub fn assign(&mut self, slot: Slot, field: Option<ShotField>) {
        match field {
            Some(f) => {
                self.slots.insert(slot, f);
            }
            None => {
                self.slots.remove(&slot);
            }
        }
    }

    /// Field shown in `slot`.
    pub fn get(&self, slot: Slot) -> Option<ShotField> {
        self.slots.get(&slot).copied()
    }

    /// Assigned slots in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, ShotField)> + '_ {
        self.slots.iter().map(|(s, f)| (*s, *f))
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when no slot is assigned.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Apply a `slot=field` spec; `slot=none` clears the slot.
    pub fn apply_spec(&mut self, spec: &str) -> SlateResult<()> {
        let (slot, field) = spec.split_once('=').ok_or_else(|| {
            SlateError::validation(format!("slot spec '{spec}' must look like slot=field"))
        })?;
        let slot: Slot = slot.trim().parse()?;
        let field = match field.trim() {
            "" | "none" | "--None--" => None,
            name => Some(name.parse::<ShotField>()?),
        };
        self.assign(slot, field);
        Ok(())
    }
}

/// Padding and text geometry for one render.
///
/// Geometry is expressed as ffmpeg expressions over the frame size (`ih`/`h`, `iw`/`w`) and can
/// also be evaluated numerically for a known frame height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlateLayout {
    padding: f64,
    font_size: u32,
}

impl SlateLayout {
    /// `padding` is the fraction of frame height covered by each bar.
    pub fn new(padding: f64, font_size: u32) -> SlateResult<Self> {
        validate_padding(padding)?;
        if font_size == 0 {
            return Err(SlateError::validation("font size must be > 0"));
        }
        Ok(Self { padding, font_size })
    }

    /// Fraction of frame height covered by each bar.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Text size in pixels.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// `y` of the bar's top edge, as an expression.
    pub fn box_y_expr(&self, band: Band) -> String {
        match band {
            Band::Top => "0".to_string(),
            Band::Bottom => format!("ih*(1-{})", fmt_num(self.padding)),
        }
    }

    /// Bar height, as an expression.
    pub fn box_h_expr(&self) -> String {
        format!("ih*{}", fmt_num(self.padding))
    }

    /// Text `x`, as an expression.
    pub fn text_x_expr(&self, align: HAlign) -> String {
        match align {
            HAlign::Left => LEFT_MARGIN_PX.to_string(),
            HAlign::Center => "(w-tw)/2".to_string(),
            HAlign::Right => "w-tw".to_string(),
        }
    }

    /// Text `y`, as an expression; centers the line inside its bar.
    pub fn text_y_expr(&self, band: Band) -> String {
        format!(
            "h*{}-{}",
            fmt_num(self.band_center_fraction(band)),
            fmt_num(f64::from(self.font_size) / 2.0)
        )
    }

    /// Text `y` in pixels for a frame `frame_height` pixels tall.
    pub fn text_y(&self, band: Band, frame_height: f64) -> f64 {
        frame_height * self.band_center_fraction(band) - f64::from(self.font_size) / 2.0
    }

    /// Bar height in pixels for a frame `frame_height` pixels tall.
    pub fn box_height(&self, frame_height: f64) -> f64 {
        frame_height * self.padding
    }

    fn band_center_fraction(&self, band: Band) -> f64 {
        match band {
            Band::Top => self.padding / 2.0,
            Band::Bottom => 1.0 - self.padding / 2.0,
        }
    }
}

/// Bars must leave part of the picture visible.
pub fn validate_padding(padding: f64) -> SlateResult<()> {
    if !(0.0..0.5).contains(&padding) {
        return Err(SlateError::validation(format!(
            "padding fraction must be in [0, 0.5), got {padding}"
        )));
    }
    Ok(())
}

/// Shortest decimal form with at most six fractional digits.
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/layout.rs"]
mod tests;
