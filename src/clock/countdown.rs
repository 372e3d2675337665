use chrono::{DateTime, Utc};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Remaining duration split into display units.
///
/// Invariant: `days*86400 + hours*3600 + minutes*60 + seconds` equals the total it was built from,
/// with `hours < 24` and `minutes, seconds < 60`. `days` is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Decomposition {
    /// Whole days.
    pub days: u64,
    /// Hours in `0..24`.
    pub hours: u32,
    /// Minutes in `0..60`.
    pub minutes: u32,
    /// Seconds in `0..60`.
    pub seconds: u32,
}

impl Decomposition {
    /// Reassemble the total number of seconds.
    pub fn total_seconds(self) -> u64 {
        self.days * SECS_PER_DAY
            + u64::from(self.hours) * SECS_PER_HOUR
            + u64::from(self.minutes) * SECS_PER_MINUTE
            + u64::from(self.seconds)
    }

    /// `true` once the deadline has been reached.
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }
}

/// Whole seconds from `reference` until `target`, floored and clamped at zero.
pub fn remaining_seconds(target: DateTime<Utc>, reference: DateTime<Utc>) -> u64 {
    remaining_millis(target, reference) / 1000
}

/// Milliseconds from `reference` until `target`, clamped at zero.
///
/// Sub-millisecond precision is truncated, which floors for every positive difference.
pub fn remaining_millis(target: DateTime<Utc>, reference: DateTime<Utc>) -> u64 {
    let ms = target.signed_duration_since(reference).num_milliseconds();
    u64::try_from(ms).unwrap_or(0)
}

/// Split a non-negative number of seconds into days/hours/minutes/seconds.
pub fn decompose(total_seconds: u64) -> Decomposition {
    let days = total_seconds / SECS_PER_DAY;
    let rem = total_seconds % SECS_PER_DAY;
    Decomposition {
        days,
        hours: (rem / SECS_PER_HOUR) as u32,
        minutes: ((rem % SECS_PER_HOUR) / SECS_PER_MINUTE) as u32,
        seconds: (rem % SECS_PER_MINUTE) as u32,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/countdown.rs"]
mod tests;
