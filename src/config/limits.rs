use chrono::TimeDelta;
use chrono_tz::Tz;

use crate::foundation::core::{HexColor, Profile};

/// Inclusive integer range with a fallback used when the raw value is missing or unparsable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub min: i64,
    /// Inclusive upper bound.
    pub max: i64,
    /// Value substituted for missing or unparsable input (clamped like any other value).
    pub default: i64,
}

impl IntRange {
    /// Build a range. `min <= max` is expected of the presets.
    pub const fn new(min: i64, max: i64, default: i64) -> Self {
        Self { min, max, default }
    }

    /// `max(min, min(max, value))`.
    pub fn clamp(self, value: i64) -> i64 {
        self.min.max(self.max.min(value))
    }

    /// Parse an optional raw value, falling back to the default, then clamp.
    pub fn resolve(self, raw: Option<&str>) -> i64 {
        let parsed = raw.and_then(|s| s.trim().parse::<i64>().ok());
        self.clamp(parsed.unwrap_or(self.default))
    }

    /// `true` when `value` already lies within the range.
    pub fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Animation-only bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationLimits {
    /// Requested animation length in seconds.
    pub duration_secs: IntRange,
    /// Ticks per second; 1 selects the whole-second cadence.
    pub fps: IntRange,
    /// Encoder quality/speed factor (1 = best, slowest).
    pub quality: IntRange,
    /// Hard cap on frames per sequence.
    pub max_frames: u32,
    /// Ceiling on `frames * width * height`.
    pub max_pixel_frames: u64,
    /// Whether separators blink unless the request says otherwise.
    pub blink_default: bool,
    /// Full on/off blink period.
    pub blink_period_ms: u32,
}

/// Every clamp range and default for one deployment profile.
///
/// Values are fixed per preset; requests can only move within them.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileLimits {
    /// Profile the limits belong to.
    pub profile: Profile,
    /// Canvas width in pixels.
    pub width: IntRange,
    /// Canvas height in pixels.
    pub height: IntRange,
    /// Distance from "now" used when no usable deadline was supplied.
    pub default_horizon: TimeDelta,
    /// Zone for deadlines without an offset when `tz` is missing or unknown.
    pub default_time_zone: Tz,
    /// Background colour default.
    pub background: HexColor,
    /// Digit and label colour default.
    pub foreground: HexColor,
    /// Separator colour default.
    pub accent: HexColor,
    /// Font fallback list default.
    pub font_families: Vec<String>,
    /// Longest accepted font list.
    pub max_font_families: usize,
    /// Longest accepted font family name, in chars.
    pub max_font_family_len: usize,
    /// `Some` for animated profiles.
    pub animation: Option<AnimationLimits>,
}

const DEFAULT_FONTS: [&str; 4] = ["DejaVu Sans", "Arial", "Helvetica", "sans-serif"];

impl ProfileLimits {
    /// Limits for single-frame PNG output.
    pub fn still() -> Self {
        Self {
            profile: Profile::Still,
            width: IntRange::new(100, 1200, 600),
            height: IntRange::new(40, 600, 150),
            default_horizon: TimeDelta::days(1),
            default_time_zone: Tz::UTC,
            background: HexColor::from_static("#111111"),
            foreground: HexColor::from_static("#ffffff"),
            accent: HexColor::from_static("#ff3366"),
            font_families: DEFAULT_FONTS.iter().map(|s| (*s).to_owned()).collect(),
            max_font_families: 8,
            max_font_family_len: 64,
            animation: None,
        }
    }

    /// Limits for looping GIF output. Canvases are smaller to bound frame cost.
    pub fn animated() -> Self {
        Self {
            profile: Profile::Animated,
            width: IntRange::new(100, 800, 600),
            height: IntRange::new(40, 300, 150),
            animation: Some(AnimationLimits {
                duration_secs: IntRange::new(1, 180, 60),
                fps: IntRange::new(1, 10, 1),
                quality: IntRange::new(1, 30, 10),
                max_frames: 300,
                max_pixel_frames: 24_000_000,
                blink_default: true,
                blink_period_ms: 1000,
            }),
            ..Self::still()
        }
    }

    /// Preset for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Still => Self::still(),
            Profile::Animated => Self::animated(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/limits.rs"]
mod tests;
