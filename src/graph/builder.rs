use crate::graph::escape::{
    escape_graph_value, escape_option_value, escape_text_expansion,
};
use crate::graph::layout::{Band, SlateLayout, Slot, SlotAssignment};
use crate::shot::metadata::{ShotField, ShotMetadata};

/// Fill color of the padding bars.
pub const BOX_COLOR: &str = "black";
/// Slate text color.
pub const TEXT_COLOR: &str = "white@0.7";

/// One filter in the `-vf` chain.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterDirective {
    /// Opaque padding bar.
    PaddingBox {
        /// Which bar.
        band: Band,
        /// Top edge expression.
        y: String,
        /// Height expression.
        h: String,
    },
    /// Text drawn into one slot.
    Text {
        /// Slot the text is drawn in.
        slot: Slot,
        /// Field the text came from.
        field: ShotField,
        /// Unescaped text, possibly containing the frame placeholder.
        text: String,
        /// Horizontal position expression.
        x: String,
        /// Vertical position expression.
        y: String,
    },
}

/// Complete `-vf` filter chain: two padding bars then one text per assigned slot.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterGraph {
    directives: Vec<FilterDirective>,
    font_path: String,
    font_size: u32,
    start_number: u64,
}

impl FilterGraph {
    /// Directives in chain order.
    pub fn directives(&self) -> &[FilterDirective] {
        &self.directives
    }

    /// Number of text directives.
    pub fn text_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| matches!(d, FilterDirective::Text { .. }))
            .count()
    }

    /// Render the escaped `-vf` value.
    pub fn render(&self) -> String {
        self.directives
            .iter()
            .map(|d| self.render_directive(d))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn render_directive(&self, directive: &FilterDirective) -> String {
        let (name, options) = match directive {
            FilterDirective::PaddingBox { y, h, .. } => (
                "drawbox",
                vec![
                    ("x", "0".to_string()),
                    ("y", y.clone()),
                    ("w", "iw".to_string()),
                    ("h", h.clone()),
                    ("color", BOX_COLOR.to_string()),
                    ("t", "fill".to_string()),
                ],
            ),
            FilterDirective::Text { text, x, y, .. } => (
                "drawtext",
                vec![
                    ("fontfile", escape_option_value(&self.font_path)),
                    (
                        "text",
                        escape_option_value(&escape_text_expansion(text)),
                    ),
                    ("start_number", self.start_number.to_string()),
                    ("x", x.clone()),
                    ("y", y.clone()),
                    ("fontcolor", TEXT_COLOR.to_string()),
                    ("fontsize", self.font_size.to_string()),
                ],
            ),
        };
        let args = options
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(":");
        format!("{name}={}", escape_graph_value(&args))
    }
}

impl std::fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds the slate [`FilterGraph`] for a layout and font.
#[derive(Clone, Debug)]
pub struct FilterGraphBuilder {
    layout: SlateLayout,
    font_path: String,
    start_number: u64,
}

impl FilterGraphBuilder {
    /// `start_number` seeds the `%{n}` frame counter.
    pub fn new(layout: SlateLayout, font_path: impl Into<String>, start_number: u64) -> Self {
        Self {
            layout,
            font_path: font_path.into(),
            start_number,
        }
    }

    /// Padding bars plus one text per assigned slot, in slot order.
    pub fn build(&self, slots: &SlotAssignment, metadata: &ShotMetadata) -> FilterGraph {
        let mut directives = Vec::with_capacity(2 + slots.len());
        for band in [Band::Top, Band::Bottom] {
            directives.push(FilterDirective::PaddingBox {
                band,
                y: self.layout.box_y_expr(band),
                h: self.layout.box_h_expr(),
            });
        }
        for (slot, field) in slots.iter() {
            directives.push(FilterDirective::Text {
                slot,
                field,
                text: metadata.get(field).to_string(),
                x: self.layout.text_x_expr(slot.align()),
                y: self.layout.text_y_expr(slot.band()),
            });
        }

        FilterGraph {
            directives,
            font_path: self.font_path.clone(),
            font_size: self.layout.font_size(),
            start_number: self.start_number,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/builder.rs"]
mod tests;
