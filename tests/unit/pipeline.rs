use super::*;
use crate::config::limits::ProfileLimits;
use crate::config::params::RawParams;
use crate::config::resolve::resolve;
use crate::encode::gif::GifSequenceEncoder;
use crate::encode::png::PngStillEncoder;
use chrono::TimeZone;
use image::AnimationDecoder as _;
use std::sync::atomic::{AtomicUsize, Ordering};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn config(limits: ProfileLimits, pairs: &[(&str, &str)]) -> RenderConfig {
    resolve(&RawParams::from_pairs(pairs.iter().copied()), &limits, now())
}

/// Paints the canvas with a grey level derived from the seconds digit shown in the scene.
#[derive(Default)]
struct StubRasterizer {
    calls: AtomicUsize,
}

impl Rasterizer for StubRasterizer {
    fn render(&self, scene: &Scene, target_width: u32) -> anyhow::Result<PixelBuffer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let seconds = scene
            .texts()
            .filter_map(|p| p.text())
            .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
            .nth(3)
            .and_then(|t| t.parse::<u8>().ok())
            .unwrap_or(0);
        let mut buf = PixelBuffer::transparent(target_width, scene.height);
        for px in buf.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[seconds * 4, seconds * 4, seconds * 4, 255]);
        }
        Ok(buf)
    }
}

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn render(&self, _scene: &Scene, _target_width: u32) -> anyhow::Result<PixelBuffer> {
        anyhow::bail!("no pixels today")
    }
}

struct WrongSizeRasterizer;

impl Rasterizer for WrongSizeRasterizer {
    fn render(&self, scene: &Scene, target_width: u32) -> anyhow::Result<PixelBuffer> {
        Ok(PixelBuffer::transparent(target_width + 1, scene.height))
    }
}

struct FailingEncoder;

impl SequenceEncoder for FailingEncoder {
    fn content_type(&self) -> &'static str {
        "image/gif"
    }

    fn encode_sequence(
        &self,
        _frames: &[TimedBuffer],
        _settings: SequenceSettings,
    ) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("disk full")
    }
}

#[test]
fn still_render_produces_png_at_canvas_size() {
    let cfg = config(ProfileLimits::still(), &[("w", "200"), ("h", "60")]);
    let raster = StubRasterizer::default();
    let out = render_still(&cfg, now(), &raster, &PngStillEncoder).unwrap();
    assert_eq!(out.profile, Profile::Still);
    assert_eq!(out.content_type, "image/png");
    assert_eq!(out.frame_count, 1);
    let img = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (200, 60));
    assert_eq!(raster.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn animated_render_encodes_every_tick() {
    let cfg = config(
        ProfileLimits::animated(),
        &[("dur", "120"), ("w", "100"), ("h", "40"), ("q", "30")],
    );
    let raster = StubRasterizer::default();
    let out = render_animated(
        &cfg,
        now(),
        &raster,
        &GifSequenceEncoder,
        &RenderThreading::default(),
    )
    .unwrap();
    assert_eq!(out.content_type, "image/gif");
    assert_eq!(out.frame_count, 120);
    assert_eq!(raster.calls.load(Ordering::SeqCst), 120);

    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(&out.bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 120);
    for f in &frames {
        let (n, d) = f.delay().numer_denom_ms();
        assert_eq!(n / d, 1000);
    }
}

#[test]
fn parallel_rasterization_preserves_tick_order() {
    let cfg = config(
        ProfileLimits::animated(),
        &[("dur", "40"), ("w", "100"), ("h", "40")],
    );
    let spec = match cfg.animation {
        Animation::Animated(spec) => spec,
        Animation::Static => unreachable!(),
    };
    let seq = build_sequence_from(&cfg, &spec, CapturedStart::from_secs(100));
    let raster = StubRasterizer::default();
    let sequential =
        rasterize_sequence(&seq, &raster, cfg.canvas, &RenderThreading::default()).unwrap();
    let parallel = rasterize_sequence(
        &seq,
        &raster,
        cfg.canvas,
        &RenderThreading {
            parallel: true,
            threads: Some(4),
        },
    )
    .unwrap();
    assert_eq!(sequential, parallel);
    // 100 -> 61 seconds: grey level follows the seconds digit.
    assert_eq!(parallel[0].buffer.data[0], 40 * 4);
    assert_eq!(parallel[39].buffer.data[0], 4);
}

#[test]
fn zero_threads_is_rejected() {
    let cfg = config(ProfileLimits::animated(), &[("dur", "2")]);
    let err = render_animated(
        &cfg,
        now(),
        &StubRasterizer::default(),
        &GifSequenceEncoder,
        &RenderThreading {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, TickdownError::Validation(_)));
}

#[test]
fn raster_pool_honours_thread_count_and_names_workers() {
    let pool = raster_pool(Some(3)).unwrap();
    assert_eq!(pool.current_num_threads(), 3);
    let name = pool.install(|| std::thread::current().name().map(str::to_owned));
    assert!(name.is_some_and(|n| n.starts_with(RASTER_THREAD_PREFIX)));
    assert!(raster_pool(None).unwrap().current_num_threads() >= 1);
}

#[test]
fn rasterizer_failure_fails_request_with_profile() {
    let still = config(ProfileLimits::still(), &[]);
    let err = render_still(&still, now(), &FailingRasterizer, &PngStillEncoder).unwrap_err();
    assert_eq!(err.profile(), Some(Profile::Still));
    assert!(err.to_string().contains("no pixels today"));

    let animated = config(ProfileLimits::animated(), &[("dur", "3")]);
    let err = render_animated(
        &animated,
        now(),
        &FailingRasterizer,
        &GifSequenceEncoder,
        &RenderThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TickdownError::Render {
            profile: Profile::Animated,
            ..
        }
    ));
}

#[test]
fn wrong_buffer_size_is_a_render_failure() {
    let cfg = config(ProfileLimits::still(), &[]);
    let err = render_still(&cfg, now(), &WrongSizeRasterizer, &PngStillEncoder).unwrap_err();
    assert!(matches!(err, TickdownError::Render { .. }));
}

#[test]
fn encoder_failure_is_an_encode_error() {
    let cfg = config(ProfileLimits::animated(), &[("dur", "2"), ("w", "100"), ("h", "40")]);
    let err = render_animated(
        &cfg,
        now(),
        &StubRasterizer::default(),
        &FailingEncoder,
        &RenderThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TickdownError::Encode {
            profile: Profile::Animated,
            ..
        }
    ));
}

#[test]
fn render_dispatches_on_profile() {
    let raster = StubRasterizer::default();
    let threading = RenderThreading::default();
    let still = config(ProfileLimits::still(), &[("w", "100"), ("h", "40")]);
    let out = render(&still, now(), &raster, &PngStillEncoder, &GifSequenceEncoder, &threading)
        .unwrap();
    assert_eq!(out.content_type, "image/png");

    let animated = config(ProfileLimits::animated(), &[("dur", "2"), ("w", "100"), ("h", "40")]);
    let out = render(&animated, now(), &raster, &PngStillEncoder, &GifSequenceEncoder, &threading)
        .unwrap();
    assert_eq!(out.content_type, "image/gif");
    assert_eq!(out.frame_count, 2);
}

#[test]
fn animated_entry_point_rejects_static_config() {
    let still = config(ProfileLimits::still(), &[]);
    let err = render_animated(
        &still,
        now(),
        &StubRasterizer::default(),
        &GifSequenceEncoder,
        &RenderThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TickdownError::Validation(_)));
}

#[test]
fn headers_disable_caching() {
    let headers = response_headers("image/gif");
    assert!(headers.contains(&("Content-Type", "image/gif")));
    assert!(
        headers
            .iter()
            .any(|(k, v)| *k == "Cache-Control" && v.contains("no-store"))
    );
}

#[test]
fn still_scene_uses_remaining_time_at_now() {
    let cfg = config(ProfileLimits::still(), &[("to", "2026-10-20T13:01:05Z")]);
    let scene = still_scene(&cfg, now());
    let digits: Vec<&str> = scene
        .texts()
        .filter_map(|p| p.text())
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .collect();
    assert_eq!(digits, ["01", "01", "01", "05"]);
}
