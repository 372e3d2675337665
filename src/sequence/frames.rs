use chrono::{DateTime, Utc};

use crate::clock::countdown::{Decomposition, decompose, remaining_millis};
use crate::config::model::{Animation, AnimationSpec, Cadence, RenderConfig};
use crate::foundation::core::TickIndex;
use crate::layout::engine::layout;
use crate::scene::model::Scene;
use crate::sequence::schedule::visual_flags;

/// Loop count meaning "repeat forever".
///
/// Countdown animations always loop: the encoded artifact cannot resynchronize with real time,
/// so a copy displayed after its window shows the same (stale) loop again.
pub const LOOP_FOREVER: u16 = 0;

/// Remaining time captured once, at the start of a sequence.
///
/// Every tick is derived from this single value; wall-clock time is never sampled per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CapturedStart {
    remaining_ms: u64,
}

impl CapturedStart {
    /// Capture the remaining time from `now` until `target`.
    pub fn capture(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_millis(remaining_millis(target, now))
    }

    /// Use an explicit remaining value.
    pub fn from_millis(remaining_ms: u64) -> Self {
        Self { remaining_ms }
    }

    /// Use an explicit remaining value in whole seconds.
    pub fn from_secs(remaining_secs: u64) -> Self {
        Self::from_millis(remaining_secs.saturating_mul(1000))
    }

    /// Captured remaining milliseconds.
    pub fn remaining_ms(self) -> u64 {
        self.remaining_ms
    }

    /// Remaining whole seconds at `tick`.
    ///
    /// Whole-second cadences floor the captured value first, so successive ticks differ by
    /// exactly one second until the value reaches zero, where it stays.
    pub fn remaining_secs_at(self, tick: TickIndex, cadence: Cadence) -> u64 {
        let start = match cadence {
            Cadence::WholeSeconds => self.remaining_ms - self.remaining_ms % 1000,
            Cadence::Fractional { .. } => self.remaining_ms,
        };
        let elapsed = tick.0.saturating_mul(u64::from(cadence.interval_ms()));
        start.saturating_sub(elapsed) / 1000
    }
}

/// One animation tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Position in the sequence.
    pub tick: TickIndex,
    /// Countdown value shown by this frame.
    pub remaining: Decomposition,
    /// What to draw.
    pub scene: Scene,
    /// Display time before the next frame.
    pub delay_ms: u32,
}

/// Ordered frames plus loop policy, ready for rasterization and encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    /// Frames in tick order.
    pub frames: Vec<Frame>,
    /// Number of loops; [`LOOP_FOREVER`] repeats indefinitely.
    pub loop_count: u16,
}

impl FrameSequence {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` for an empty sequence (never produced by [`build_sequence`]).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total playback time of one loop.
    pub fn total_delay_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay_ms)).sum()
    }
}

/// Build the frame sequence for an animated config, capturing the start value at `now`.
///
/// Returns `None` for static configs; callers lay those out once with
/// [`layout`](crate::layout::engine::layout).
#[tracing::instrument(skip(config), fields(profile = %config.profile()))]
pub fn build_sequence(config: &RenderConfig, now: DateTime<Utc>) -> Option<FrameSequence> {
    let Animation::Animated(spec) = &config.animation else {
        return None;
    };
    let start = CapturedStart::capture(config.target, now);
    Some(build_sequence_from(config, spec, start))
}

/// Build the frame sequence from an already captured start value.
///
/// Deterministic: equal inputs give equal sequences.
pub fn build_sequence_from(
    config: &RenderConfig,
    spec: &AnimationSpec,
    start: CapturedStart,
) -> FrameSequence {
    let plan = spec.tick_plan();
    let frames = (0..u64::from(plan.frame_count))
        .map(|i| {
            let tick = TickIndex(i);
            let remaining = decompose(start.remaining_secs_at(tick, spec.cadence));
            let flags = visual_flags(tick, &spec.blink, plan.interval_ms);
            Frame {
                tick,
                remaining,
                scene: layout(config, remaining, flags),
                delay_ms: plan.delay_ms,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        frames = frames.len(),
        delay_ms = plan.delay_ms,
        start_ms = start.remaining_ms(),
        "built frame sequence"
    );

    FrameSequence {
        frames,
        loop_count: LOOP_FOREVER,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/frames.rs"]
mod tests;
