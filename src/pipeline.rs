use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::clock::countdown::{decompose, remaining_seconds};
use crate::config::model::{Animation, RenderConfig};
use crate::encode::sink::{SequenceEncoder, SequenceSettings, StillEncoder, TimedBuffer};
use crate::foundation::core::{Canvas, Profile};
use crate::foundation::error::{TickdownError, TickdownResult};
use crate::layout::engine::{VisualFlags, layout};
use crate::render::backend::{PixelBuffer, Rasterizer};
use crate::scene::model::Scene;
use crate::sequence::frames::{CapturedStart, FrameSequence, build_sequence_from};

/// `Cache-Control` for every response: output depends on "now" and is stale immediately.
pub const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

const RASTER_THREAD_PREFIX: &str = "tickdown-raster-";

/// Threading controls for rasterizing the frames of one sequence.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Rasterize frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Encoded output of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Profile the request was rendered for.
    pub profile: Profile,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Encoded image.
    pub bytes: Vec<u8>,
    /// Frames in the output (1 for stills).
    pub frame_count: usize,
}

impl RenderedImage {
    /// Response headers a host should attach.
    pub fn headers(&self) -> [(&'static str, &'static str); 4] {
        response_headers(self.content_type)
    }
}

/// `Content-Type` plus headers that disable every layer of caching.
pub fn response_headers(content_type: &'static str) -> [(&'static str, &'static str); 4] {
    [
        ("Content-Type", content_type),
        ("Cache-Control", CACHE_CONTROL),
        ("Pragma", "no-cache"),
        ("Expires", "0"),
    ]
}

/// Lay out the single scene of a still render at `now`.
pub fn still_scene(config: &RenderConfig, now: DateTime<Utc>) -> Scene {
    let remaining = decompose(remaining_seconds(config.target, now));
    layout(config, remaining, VisualFlags::default())
}

/// Render and encode a still image.
#[tracing::instrument(skip_all, fields(profile = %Profile::Still))]
pub fn render_still(
    config: &RenderConfig,
    now: DateTime<Utc>,
    rasterizer: &dyn Rasterizer,
    encoder: &dyn StillEncoder,
) -> TickdownResult<RenderedImage> {
    let scene = still_scene(config, now);
    let buffer = rasterize_checked(rasterizer, &scene, config.canvas, Profile::Still)?;
    let bytes = encoder
        .encode_still(&buffer)
        .map_err(|e| TickdownError::encode(Profile::Still, format!("{e:#}")))?;

    tracing::info!(profile = %Profile::Still, frames = 1, bytes = bytes.len(), "rendered");
    Ok(RenderedImage {
        profile: Profile::Still,
        content_type: encoder.content_type(),
        bytes,
        frame_count: 1,
    })
}

/// Render and encode an animated countdown.
///
/// The remaining time is captured once at `now`. Any failing frame fails the whole request.
#[tracing::instrument(skip_all, fields(profile = %Profile::Animated))]
pub fn render_animated(
    config: &RenderConfig,
    now: DateTime<Utc>,
    rasterizer: &dyn Rasterizer,
    encoder: &dyn SequenceEncoder,
    threading: &RenderThreading,
) -> TickdownResult<RenderedImage> {
    let Animation::Animated(spec) = &config.animation else {
        return Err(TickdownError::validation(
            "render_animated requires an animated config",
        ));
    };

    let sequence = build_sequence_from(config, spec, CapturedStart::capture(config.target, now));
    let frames = rasterize_sequence(&sequence, rasterizer, config.canvas, threading)?;
    let settings = SequenceSettings {
        loop_count: sequence.loop_count,
        quality: spec.quality,
    };
    let bytes = encoder
        .encode_sequence(&frames, settings)
        .map_err(|e| TickdownError::encode(Profile::Animated, format!("{e:#}")))?;

    tracing::info!(
        profile = %Profile::Animated,
        frames = frames.len(),
        bytes = bytes.len(),
        "rendered"
    );
    Ok(RenderedImage {
        profile: Profile::Animated,
        content_type: encoder.content_type(),
        bytes,
        frame_count: frames.len(),
    })
}

/// Render `config` with the encoder matching its profile.
pub fn render(
    config: &RenderConfig,
    now: DateTime<Utc>,
    rasterizer: &dyn Rasterizer,
    still: &dyn StillEncoder,
    sequence: &dyn SequenceEncoder,
    threading: &RenderThreading,
) -> TickdownResult<RenderedImage> {
    match config.animation {
        Animation::Static => render_still(config, now, rasterizer, still),
        Animation::Animated(_) => render_animated(config, now, rasterizer, sequence, threading),
    }
}

/// Rasterize every frame of `sequence`, keeping tick order.
pub fn rasterize_sequence(
    sequence: &FrameSequence,
    rasterizer: &dyn Rasterizer,
    canvas: Canvas,
    threading: &RenderThreading,
) -> TickdownResult<Vec<TimedBuffer>> {
    let one = |frame: &crate::sequence::frames::Frame| -> TickdownResult<TimedBuffer> {
        Ok(TimedBuffer {
            buffer: rasterize_checked(rasterizer, &frame.scene, canvas, Profile::Animated)?,
            delay_ms: frame.delay_ms,
        })
    };

    if !threading.parallel {
        return sequence.frames.iter().map(one).collect();
    }

    let pool = raster_pool(threading.threads)?;
    pool.install(|| sequence.frames.par_iter().map(one).collect())
}

fn rasterize_checked(
    rasterizer: &dyn Rasterizer,
    scene: &Scene,
    canvas: Canvas,
    profile: Profile,
) -> TickdownResult<PixelBuffer> {
    let buffer = rasterizer
        .render(scene, canvas.width)
        .map_err(|e| TickdownError::render(profile, format!("{e:#}")))?;
    if buffer.width != canvas.width || buffer.height != canvas.height {
        return Err(TickdownError::render(
            profile,
            format!(
                "rasterizer returned {}x{}, expected {}x{}",
                buffer.width, buffer.height, canvas.width, canvas.height
            ),
        ));
    }
    if !buffer.is_well_formed() {
        return Err(TickdownError::render(
            profile,
            "rasterizer returned a buffer with the wrong byte length",
        ));
    }
    Ok(buffer)
}

/// Dedicated pool for one sequence; `threads: None` lets rayon pick from the host.
fn raster_pool(threads: Option<usize>) -> TickdownResult<rayon::ThreadPool> {
    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|i| format!("{RASTER_THREAD_PREFIX}{i}"));
    match threads {
        Some(0) => {
            return Err(TickdownError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Some(n) => builder = builder.num_threads(n),
        None => {}
    }
    builder
        .build()
        .map_err(|e| TickdownError::Other(anyhow::Error::new(e).context("build raster thread pool")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
