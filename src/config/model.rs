use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::foundation::core::{Canvas, HexColor, Profile};

/// How numeric text is made to fit its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Stretch or compress the glyph run to exactly the cell's inner width.
    #[default]
    StretchToBox,
    /// Pick the largest font size that fits both the band height and the cell width.
    ScaleFontSize,
}

/// Separator blink configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlinkSchedule {
    /// When `false`, separators are always fully opaque.
    pub enabled: bool,
    /// Full on/off period.
    pub period_ms: u32,
}

impl BlinkSchedule {
    /// Separators never blink.
    pub const OFF: Self = Self {
        enabled: false,
        period_ms: 1000,
    };
}

/// Tick rate of an animated countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// One frame per second; every delay is exactly 1000 ms.
    WholeSeconds,
    /// Several frames per second.
    Fractional {
        /// Ticks per second, `>= 2`.
        fps: u32,
    },
}

/// GIF delays are stored in hundredths of a second.
const DELAY_RESOLUTION_MS: u32 = 10;

impl Cadence {
    /// Distance between two ticks, also used as the per-frame delay.
    pub fn interval_ms(self) -> u32 {
        match self {
            Self::WholeSeconds => 1000,
            Self::Fractional { fps } => {
                let raw = 1000 / fps.max(1);
                (raw / DELAY_RESOLUTION_MS * DELAY_RESOLUTION_MS).max(DELAY_RESOLUTION_MS)
            }
        }
    }
}

/// Frame count and timing derived from an [`AnimationSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickPlan {
    /// Number of frames in the sequence.
    pub frame_count: u32,
    /// Display time of every frame.
    pub delay_ms: u32,
    /// Countdown distance between successive ticks.
    pub interval_ms: u32,
}

/// Timing of an animated render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationSpec {
    /// Requested animation length.
    pub duration_secs: u32,
    /// Tick rate.
    pub cadence: Cadence,
    /// Encoder quality/speed factor (1 = best).
    pub quality: u8,
    /// Separator blink.
    pub blink: BlinkSchedule,
    /// Upper bound on frames after the resource guard.
    pub max_frames: u32,
}

impl AnimationSpec {
    /// Frame count and delays for this spec.
    ///
    /// Whole-second cadence yields one frame per requested second; fractional cadence covers the
    /// requested duration at the tick interval. Both are bounded to `1..=max_frames`.
    pub fn tick_plan(&self) -> TickPlan {
        let interval_ms = self.cadence.interval_ms();
        let wanted = match self.cadence {
            Cadence::WholeSeconds => u64::from(self.duration_secs),
            Cadence::Fractional { .. } => {
                (u64::from(self.duration_secs) * 1000).div_ceil(u64::from(interval_ms))
            }
        };
        let frame_count = wanted.clamp(1, u64::from(self.max_frames.max(1))) as u32;
        TickPlan {
            frame_count,
            delay_ms: interval_ms,
            interval_ms,
        }
    }
}

/// Static or animated output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Single frame; no timing.
    Static,
    /// Looping animation.
    Animated(AnimationSpec),
}

/// Predictable cost of one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkEstimate {
    /// Frames to lay out and rasterize.
    pub frames: u32,
    /// Pixels in each frame.
    pub pixels_per_frame: u64,
    /// `frames * pixels_per_frame`.
    pub pixel_frames: u64,
}

/// Validated, bounded configuration for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Absolute deadline.
    pub target: DateTime<Utc>,
    /// Zone used to read the deadline string; informational once `target` is resolved.
    pub time_zone: Tz,
    /// Output size.
    pub canvas: Canvas,
    /// Background colour.
    pub background: HexColor,
    /// Digit and label colour.
    pub foreground: HexColor,
    /// Separator colour.
    pub accent: HexColor,
    /// Ordered font fallback list; never empty.
    pub font_families: Vec<String>,
    /// Numeric text fit strategy.
    pub fit: FitStrategy,
    /// Static or animated output.
    pub animation: Animation,
}

impl RenderConfig {
    /// Profile implied by [`RenderConfig::animation`].
    pub fn profile(&self) -> Profile {
        match self.animation {
            Animation::Static => Profile::Still,
            Animation::Animated(_) => Profile::Animated,
        }
    }

    /// Tick plan for animated configs.
    pub fn tick_plan(&self) -> Option<TickPlan> {
        match &self.animation {
            Animation::Static => None,
            Animation::Animated(spec) => Some(spec.tick_plan()),
        }
    }

    /// Cost of rendering this config, so hosts can budget latency up front.
    pub fn work_estimate(&self) -> WorkEstimate {
        let frames = self.tick_plan().map_or(1, |p| p.frame_count);
        let pixels_per_frame = self.canvas.pixel_count();
        WorkEstimate {
            frames,
            pixels_per_frame,
            pixel_frames: u64::from(frames) * pixels_per_frame,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
