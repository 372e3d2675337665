//! tickdown renders a countdown-to-a-deadline clock as a still PNG or a looping GIF, for emails
//! and pages that cannot run script.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: untrusted request parameters -> bounded [`RenderConfig`] (never fails)
//! 2. **Count**: deadline + reference instant -> [`Decomposition`] (days/hours/minutes/seconds)
//! 3. **Lay out**: config + decomposition -> [`Scene`] that always fits the canvas
//! 4. **Sequence** (animated only): one captured start value -> [`FrameSequence`] of ticks
//! 5. **Rasterize**: [`Scene`] -> [`PixelBuffer`] via a [`Rasterizer`]
//! 6. **Encode**: pixel buffers -> PNG/GIF bytes
//!
//! Steps 1-4 are pure and deterministic. Rasterization and encoding are the only fallible
//! stages; a failure in either fails the whole request with no partial output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod clock;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;
mod sequence;

/// Still and animated render orchestration.
pub mod pipeline;

pub use clock::countdown::{Decomposition, decompose, remaining_millis, remaining_seconds};
pub use config::limits::{AnimationLimits, IntRange, ProfileLimits};
pub use config::model::{
    Animation, AnimationSpec, BlinkSchedule, Cadence, FitStrategy, RenderConfig, TickPlan,
    WorkEstimate,
};
pub use config::params::RawParams;
pub use config::resolve::{parse_deadline, resolve};
pub use encode::gif::GifSequenceEncoder;
pub use encode::png::PngStillEncoder;
pub use encode::sink::{SequenceEncoder, SequenceSettings, StillEncoder, TimedBuffer};
pub use foundation::core::{Canvas, HexColor, Point, Profile, Rect, TickIndex};
pub use foundation::error::{TickdownError, TickdownResult};
pub use layout::engine::{UNIT_LABELS, VisualFlags, layout, unit_strings};
pub use pipeline::{
    CACHE_CONTROL, RenderThreading, RenderedImage, render, render_animated, render_still,
    response_headers, still_scene,
};
pub use render::backend::{PixelBuffer, Rasterizer, target_height};
pub use render::cpu::SvgRasterizer;
pub use render::svg::scene_to_svg;
pub use scene::model::{
    BOLD_GLYPH_ADVANCE_EM, BOLD_WEIGHT, FittedText, GLYPH_ADVANCE_EM, Primitive, RectPrimitive,
    Scene, TextAnchor, TextRun, estimate_text_width, glyph_advance_em,
};
pub use sequence::frames::{
    CapturedStart, Frame, FrameSequence, LOOP_FOREVER, build_sequence, build_sequence_from,
};
pub use sequence::schedule::visual_flags;
