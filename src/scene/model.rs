use crate::foundation::core::{HexColor, Point, Rect};

/// Average advance of one regular-weight glyph, in ems, used to estimate plain text width.
pub const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Upper bound on the advance of one bold glyph, in ems. Bold sans digits run close to 0.7 em.
pub const BOLD_GLYPH_ADVANCE_EM: f64 = 0.72;

/// Lowest weight estimated with [`BOLD_GLYPH_ADVANCE_EM`].
pub const BOLD_WEIGHT: u16 = 600;

/// Per-glyph advance used for text drawn at `font_weight`.
pub fn glyph_advance_em(font_weight: u16) -> f64 {
    if font_weight >= BOLD_WEIGHT {
        BOLD_GLYPH_ADVANCE_EM
    } else {
        GLYPH_ADVANCE_EM
    }
}

/// Horizontal anchoring of a text run relative to its `origin`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// `origin.x` is the left edge.
    Start,
    /// `origin.x` is the horizontal centre.
    #[default]
    Middle,
}

/// Filled axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectPrimitive {
    /// Canvas-space bounds.
    pub bounds: Rect,
    /// Fill colour.
    pub fill: HexColor,
}

/// Text whose glyph run is stretched or compressed to exactly `target_width`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FittedText {
    /// Text content.
    pub text: String,
    /// Anchor point on the baseline.
    pub origin: Point,
    /// Horizontal anchoring of `origin`.
    pub anchor: TextAnchor,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS-style font weight.
    pub font_weight: u16,
    /// Exact rendered width of the run.
    pub target_width: f64,
    /// Fill colour.
    pub fill: HexColor,
    /// Opacity in `0..=1`.
    pub opacity: f64,
    /// Box the run must stay inside.
    pub cell: Rect,
}

/// Text laid out at its natural width.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Anchor point on the baseline.
    pub origin: Point,
    /// Horizontal anchoring of `origin`.
    pub anchor: TextAnchor,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS-style font weight.
    pub font_weight: u16,
    /// Fill colour.
    pub fill: HexColor,
    /// Opacity in `0..=1`.
    pub opacity: f64,
    /// Box the run must stay inside.
    pub cell: Rect,
}

/// One drawable primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled rectangle.
    Rect(RectPrimitive),
    /// Width-fitted text.
    FittedText(FittedText),
    /// Plain text.
    Text(TextRun),
}

impl Primitive {
    /// Horizontal extent the primitive covers once rendered.
    ///
    /// Plain text is estimated per glyph with [`glyph_advance_em`].
    pub fn effective_width(&self) -> f64 {
        match self {
            Self::Rect(r) => r.bounds.width(),
            Self::FittedText(t) => t.target_width,
            Self::Text(t) => estimate_text_width(&t.text, t.font_size, t.font_weight),
        }
    }

    /// Box a text primitive must stay inside; `None` for rectangles.
    pub fn cell(&self) -> Option<Rect> {
        match self {
            Self::Rect(_) => None,
            Self::FittedText(t) => Some(t.cell),
            Self::Text(t) => Some(t.cell),
        }
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Rect(_) => None,
            Self::FittedText(t) => Some(&t.text),
            Self::Text(t) => Some(&t.text),
        }
    }
}

/// Estimated natural width of `text` at `font_size` and `font_weight`.
pub fn estimate_text_width(text: &str, font_size: f64, font_weight: u16) -> f64 {
    text.chars().count() as f64 * glyph_advance_em(font_weight) * font_size
}

/// Everything a rasterizer needs to draw one instant.
///
/// Fully determined by its inputs; safe to rasterize out of order or in parallel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Ordered font fallback list shared by all text.
    pub font_families: Vec<String>,
    /// Primitives in paint order.
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Stable JSON form, used for diagnostics and identity checks.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Text primitives in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| !matches!(p, Primitive::Rect(_)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
