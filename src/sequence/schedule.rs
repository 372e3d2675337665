use crate::config::model::BlinkSchedule;
use crate::foundation::core::TickIndex;
use crate::layout::engine::VisualFlags;

/// Visual state of tick `tick` for a sequence stepping `interval_ms` per tick.
///
/// Separators stay on when blinking is disabled. Otherwise they toggle every half period, and a
/// half period is never shorter than one tick so every state is actually shown. Tick 0 is on.
pub fn visual_flags(tick: TickIndex, blink: &BlinkSchedule, interval_ms: u32) -> VisualFlags {
    if !blink.enabled {
        return VisualFlags { blink_on: true };
    }
    let interval = u64::from(interval_ms.max(1));
    let half_period = (u64::from(blink.period_ms) / 2).max(interval);
    let elapsed = tick.0.saturating_mul(interval);
    VisualFlags {
        blink_on: (elapsed / half_period) % 2 == 0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/schedule.rs"]
mod tests;
