pub use kurbo::{Point, Rect};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels (always > 0 once resolved).
    pub width: u32,
    /// Height in pixels (always > 0 once resolved).
    pub height: u32,
}

impl Canvas {
    /// Number of pixels in one frame.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Zero-based index of one animation tick, counted from the captured start instant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TickIndex(pub u64);

/// Rendering profile a request was resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Single still frame.
    Still,
    /// Looping animation.
    Animated,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Still => f.write_str("still"),
            Self::Animated => f.write_str("animated"),
        }
    }
}

/// A colour in `#rrggbb` marker+hex form.
///
/// Normalization guarantees the leading `#` and exactly six digit positions; whether those
/// digits are legal hex is left to the rasterizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Normalize raw input (`fff`, `#FFAA00`, `ffaa00`) into marker+hex form.
    ///
    /// Three-digit shorthand expands to six digits. Other lengths are right-padded with `0`
    /// or truncated to six, so `ff` becomes `#ff0000` and `ff00ff80` becomes `#ff00ff`.
    /// Returns `None` for empty input so callers can substitute a default.
    pub fn normalize(raw: &str) -> Option<Self> {
        let body = raw.trim();
        let body = body.strip_prefix('#').unwrap_or(body).trim();
        if body.is_empty() {
            return None;
        }

        // Non-ASCII input would break the fixed byte width.
        let digits: Vec<char> = body
            .chars()
            .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { '0' })
            .collect();

        let mut out = String::with_capacity(7);
        out.push('#');
        if digits.len() == 3 {
            for c in digits {
                out.push(c);
                out.push(c);
            }
        } else {
            out.extend(digits.into_iter().chain(std::iter::repeat('0')).take(6));
        }
        Some(Self(out))
    }

    /// Build from a literal that is already in `#rrggbb` form.
    pub fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    /// The normalized string, including the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the six hex digits, if they are well formed.
    pub fn to_rgb8(&self) -> Option<[u8; 3]> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some([byte(0)?, byte(2)?, byte(4)?])
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
