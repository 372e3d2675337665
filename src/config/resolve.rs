use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::limits::{AnimationLimits, IntRange, ProfileLimits};
use crate::config::model::{
    Animation, AnimationSpec, BlinkSchedule, Cadence, FitStrategy, RenderConfig,
};
use crate::config::params::RawParams;
use crate::foundation::core::{Canvas, HexColor};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const COMPACT_DATE_LEN: usize = 8;
// Shorter digit strings would land before 1973.
const MIN_EPOCH_DIGITS: usize = 9;

/// Turn untrusted request parameters into a bounded [`RenderConfig`].
///
/// Never fails: missing or malformed fields fall back to the defaults in `limits`, and every
/// numeric field is clamped into its range. `now` anchors the default deadline.
#[tracing::instrument(skip(raw, limits), fields(profile = %limits.profile))]
pub fn resolve(raw: &RawParams, limits: &ProfileLimits, now: DateTime<Utc>) -> RenderConfig {
    let time_zone = resolve_time_zone(raw.get("tz"), limits.default_time_zone);

    let target = match raw.get("to").and_then(|s| parse_deadline(s, time_zone)) {
        Some(target) => target,
        None => {
            if let Some(to) = raw.get("to") {
                tracing::debug!(to, "unparsable deadline, using default horizon");
            }
            default_target(now, limits, time_zone)
        }
    };

    let canvas = Canvas {
        width: resolve_u32(raw, "w", limits.width),
        height: resolve_u32(raw, "h", limits.height),
    };

    let animation = match &limits.animation {
        None => Animation::Static,
        Some(anim) => Animation::Animated(resolve_animation(raw, anim, canvas)),
    };

    RenderConfig {
        target,
        time_zone,
        canvas,
        background: resolve_color(raw.get("bg"), &limits.background),
        foreground: resolve_color(raw.get("fg"), &limits.foreground),
        accent: resolve_color(raw.get("accent"), &limits.accent),
        font_families: resolve_fonts(raw.get("font"), limits),
        fit: resolve_fit(raw.get("fit")),
        animation,
    }
}

/// Parse a deadline string, reading offset-less forms in `tz`.
///
/// Accepts RFC 3339, `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, a bare `YYYY-MM-DD` or compact `YYYYMMDD`
/// (local midnight) and UNIX seconds of at least nine digits. Ambiguous local times take the earliest instant; local times that do
/// not exist in `tz` yield `None`.
pub fn parse_deadline(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return localize(date.and_hms_opt(0, 0, 0)?, tz);
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        if s.len() == COMPACT_DATE_LEN {
            let date = NaiveDate::parse_from_str(s, "%Y%m%d").ok()?;
            return localize(date.and_hms_opt(0, 0, 0)?, tz);
        }
        if s.len() < MIN_EPOCH_DIGITS {
            return None;
        }
        let secs = s.parse::<i64>().ok()?;
        return DateTime::from_timestamp(secs, 0);
    }

    None
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn default_target(now: DateTime<Utc>, limits: &ProfileLimits, tz: Tz) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    local
        .checked_add_signed(limits.default_horizon)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}

fn resolve_time_zone(raw: Option<&str>, fallback: Tz) -> Tz {
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::debug!(tz = raw, fallback = %fallback, "unknown time zone");
            fallback
        }
    }
}

fn resolve_u32(raw: &RawParams, key: &str, range: IntRange) -> u32 {
    let value = raw.get(key);
    let resolved = range.resolve(value);
    if let Some(v) = value
        && v.trim().parse::<i64>().ok() != Some(resolved)
    {
        tracing::debug!(key, raw = v, resolved, "parameter absorbed");
    }
    u32::try_from(resolved.max(0)).unwrap_or(u32::MAX)
}

fn resolve_color(raw: Option<&str>, fallback: &HexColor) -> HexColor {
    raw.and_then(HexColor::normalize)
        .unwrap_or_else(|| fallback.clone())
}

fn resolve_fonts(raw: Option<&str>, limits: &ProfileLimits) -> Vec<String> {
    let families: Vec<String> = raw
        .map(|s| {
            s.split(',')
                .map(|f| f.trim().trim_matches(['"', '\'']).trim())
                .filter(|f| !f.is_empty())
                .map(|f| f.chars().take(limits.max_font_family_len).collect())
                .take(limits.max_font_families)
                .collect()
        })
        .unwrap_or_default();

    if families.is_empty() {
        limits.font_families.clone()
    } else {
        families
    }
}

fn resolve_fit(raw: Option<&str>) -> FitStrategy {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("scale") | Some("font") => FitStrategy::ScaleFontSize,
        _ => FitStrategy::StretchToBox,
    }
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn resolve_animation(raw: &RawParams, anim: &AnimationLimits, canvas: Canvas) -> AnimationSpec {
    let duration_secs = resolve_u32(raw, "dur", anim.duration_secs);
    let fps = resolve_u32(raw, "fps", anim.fps);
    let cadence = if fps <= 1 {
        Cadence::WholeSeconds
    } else {
        Cadence::Fractional { fps }
    };
    let quality = u8::try_from(resolve_u32(raw, "q", anim.quality)).unwrap_or(u8::MAX);
    let blink = BlinkSchedule {
        enabled: parse_flag(raw.get("blink")).unwrap_or(anim.blink_default),
        period_ms: anim.blink_period_ms,
    };

    // Resource guard: frames * pixels must stay under the ceiling before any work starts.
    let by_pixels = (anim.max_pixel_frames / canvas.pixel_count().max(1)).max(1);
    let max_frames = u64::from(anim.max_frames).min(by_pixels).max(1);
    let max_duration = (max_frames * u64::from(cadence.interval_ms()) / 1000).max(1);
    let bounded_duration = u64::from(duration_secs).min(max_duration) as u32;
    if bounded_duration != duration_secs {
        tracing::debug!(
            requested = duration_secs,
            bounded = bounded_duration,
            max_frames,
            "duration lowered by pixel-frame ceiling"
        );
    }

    AnimationSpec {
        duration_secs: bounded_duration,
        cadence,
        quality,
        blink,
        max_frames: max_frames as u32,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolve.rs"]
mod tests;
