use crate::clock::countdown::Decomposition;
use crate::config::model::{Animation, FitStrategy, RenderConfig};
use crate::foundation::core::{Point, Rect};
use crate::scene::model::{
    FittedText, Primitive, RectPrimitive, Scene, TextAnchor, TextRun, glyph_advance_em,
};

/// Unit labels, left to right.
pub const UNIT_LABELS: [&str; 4] = ["DAYS", "HOURS", "MINUTES", "SECONDS"];

const MARGIN_FRAC: f64 = 0.04;
const CELL_PAD_FRAC: f64 = 0.08;
const TOP_PAD_FRAC: f64 = 0.08;
const LABEL_BAND_FRAC: f64 = 0.22;
const NUMBER_SIZE_FRAC: f64 = 0.8;
const NUMBER_WEIGHT: u16 = 700;
const LABEL_SIZE_FRAC: f64 = 0.6;
const LABEL_ADVANCE_EM: f64 = 0.62;
const SEPARATOR_ADVANCE_EM: f64 = 0.3;
// Cap height as a fraction of the em, used to centre digits vertically on a baseline.
const CAP_HEIGHT_EM: f64 = 0.7;
const LABEL_OPACITY: f64 = 0.8;

/// Per-frame visual state that is not part of the countdown value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VisualFlags {
    /// Separators are visible in this frame.
    pub blink_on: bool,
}

impl Default for VisualFlags {
    fn default() -> Self {
        Self { blink_on: true }
    }
}

/// Canvas partitioning shared by every primitive of a scene.
#[derive(Clone, Copy, Debug)]
struct Grid {
    margin_x: f64,
    cell_w: f64,
    pad: f64,
    number_top: f64,
    number_h: f64,
    label_top: f64,
    label_h: f64,
}

impl Grid {
    fn new(width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        let margin_x = w * MARGIN_FRAC;
        let cell_w = (w - 2.0 * margin_x) / 4.0;
        let number_top = h * TOP_PAD_FRAC;
        let label_h = h * LABEL_BAND_FRAC;
        Self {
            margin_x,
            cell_w,
            pad: cell_w * CELL_PAD_FRAC,
            number_top,
            number_h: h - number_top - label_h,
            label_top: h - label_h,
            label_h,
        }
    }

    fn inner_width(&self) -> f64 {
        self.cell_w - 2.0 * self.pad
    }

    fn cell_x0(&self, i: usize) -> f64 {
        self.margin_x + self.cell_w * i as f64
    }

    fn cell_center_x(&self, i: usize) -> f64 {
        self.cell_x0(i) + self.cell_w / 2.0
    }

    fn number_cell(&self, i: usize) -> Rect {
        let x0 = self.cell_x0(i) + self.pad;
        Rect::new(
            x0,
            self.number_top,
            x0 + self.inner_width(),
            self.number_top + self.number_h,
        )
    }

    fn label_cell(&self, i: usize) -> Rect {
        let x0 = self.cell_x0(i) + self.pad;
        Rect::new(
            x0,
            self.label_top,
            x0 + self.inner_width(),
            self.label_top + self.label_h,
        )
    }

    /// Gap between cell `i - 1` and cell `i`, centred on their shared boundary.
    fn separator_cell(&self, i: usize) -> Rect {
        let x = self.cell_x0(i);
        Rect::new(
            x - self.pad,
            self.number_top,
            x + self.pad,
            self.number_top + self.number_h,
        )
    }

    fn number_size_from_height(&self) -> f64 {
        self.number_h * NUMBER_SIZE_FRAC
    }

    /// Largest size at which `glyphs` digits fit both the band height and the cell width.
    fn number_size_fitting(&self, glyphs: usize) -> f64 {
        let advance = glyph_advance_em(NUMBER_WEIGHT);
        let by_width = self.inner_width() / (glyphs.max(1) as f64 * advance);
        self.number_size_from_height().min(by_width)
    }

    fn baseline(top: f64, band: f64, font_size: f64) -> f64 {
        top + (band + font_size * CAP_HEIGHT_EM) / 2.0
    }
}

/// Zero-padded two-digit strings; days may grow past two digits.
pub fn unit_strings(d: Decomposition) -> [String; 4] {
    [
        format!("{:02}", d.days),
        format!("{:02}", d.hours),
        format!("{:02}", d.minutes),
        format!("{:02}", d.seconds),
    ]
}

/// Lay out one countdown instant.
///
/// The result depends only on the arguments. Numeric text never exceeds its cell's inner width:
/// with [`FitStrategy::StretchToBox`] the run is fitted to exactly that width; with
/// [`FitStrategy::ScaleFontSize`] the font shrinks for longer day counts.
pub fn layout(config: &RenderConfig, remaining: Decomposition, flags: VisualFlags) -> Scene {
    let canvas = config.canvas;
    let grid = Grid::new(canvas.width, canvas.height);
    let mut primitives = Vec::with_capacity(1 + 4 + 3 + 4);

    primitives.push(Primitive::Rect(RectPrimitive {
        bounds: Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
        fill: config.background.clone(),
    }));

    for (i, text) in unit_strings(remaining).into_iter().enumerate() {
        primitives.push(number_primitive(config, &grid, i, text));
    }

    let blinking = matches!(&config.animation, Animation::Animated(spec) if spec.blink.enabled);
    let separator_opacity = if !blinking || flags.blink_on { 1.0 } else { 0.0 };
    // Separators match the digits beside them; under scaling, the two-digit units set the size.
    let separator_size = match config.fit {
        FitStrategy::StretchToBox => grid.number_size_from_height(),
        FitStrategy::ScaleFontSize => grid.number_size_fitting(2),
    };
    for i in 1..4 {
        let cell = grid.separator_cell(i);
        primitives.push(Primitive::FittedText(FittedText {
            text: ":".to_owned(),
            origin: Point::new(
                grid.cell_x0(i),
                Grid::baseline(grid.number_top, grid.number_h, separator_size),
            ),
            anchor: TextAnchor::Middle,
            font_size: separator_size,
            font_weight: NUMBER_WEIGHT,
            target_width: (separator_size * SEPARATOR_ADVANCE_EM).min(cell.width()),
            fill: config.accent.clone(),
            opacity: separator_opacity,
            cell,
        }));
    }

    for (i, label) in UNIT_LABELS.iter().enumerate() {
        let glyphs = label.chars().count() as f64;
        let font_size = (grid.label_h * LABEL_SIZE_FRAC)
            .min(grid.inner_width() / (glyphs * LABEL_ADVANCE_EM));
        primitives.push(Primitive::Text(TextRun {
            text: (*label).to_owned(),
            origin: Point::new(
                grid.cell_center_x(i),
                Grid::baseline(grid.label_top, grid.label_h, font_size),
            ),
            anchor: TextAnchor::Middle,
            font_size,
            font_weight: 400,
            fill: config.foreground.clone(),
            opacity: LABEL_OPACITY,
            cell: grid.label_cell(i),
        }));
    }

    Scene {
        width: canvas.width,
        height: canvas.height,
        font_families: config.font_families.clone(),
        primitives,
    }
}

fn number_primitive(config: &RenderConfig, grid: &Grid, i: usize, text: String) -> Primitive {
    let cell = grid.number_cell(i);
    match config.fit {
        FitStrategy::StretchToBox => {
            let font_size = grid.number_size_from_height();
            Primitive::FittedText(FittedText {
                origin: Point::new(
                    grid.cell_center_x(i),
                    Grid::baseline(grid.number_top, grid.number_h, font_size),
                ),
                anchor: TextAnchor::Middle,
                font_size,
                font_weight: NUMBER_WEIGHT,
                target_width: cell.width(),
                fill: config.foreground.clone(),
                opacity: 1.0,
                cell,
                text,
            })
        }
        FitStrategy::ScaleFontSize => {
            let font_size = grid.number_size_fitting(text.chars().count());
            Primitive::Text(TextRun {
                origin: Point::new(
                    grid.cell_center_x(i),
                    Grid::baseline(grid.number_top, grid.number_h, font_size),
                ),
                anchor: TextAnchor::Middle,
                font_size,
                font_weight: NUMBER_WEIGHT,
                fill: config.foreground.clone(),
                opacity: 1.0,
                cell,
                text,
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
