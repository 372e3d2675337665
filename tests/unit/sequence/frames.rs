use super::*;
use crate::config::limits::ProfileLimits;
use crate::config::params::RawParams;
use crate::config::resolve::resolve;
use chrono::{TimeDelta, TimeZone};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn animated(pairs: &[(&str, &str)]) -> RenderConfig {
    resolve(
        &RawParams::from_pairs(pairs.iter().copied()),
        &ProfileLimits::animated(),
        now(),
    )
}

fn spec_of(cfg: &RenderConfig) -> AnimationSpec {
    match cfg.animation {
        Animation::Animated(spec) => spec,
        Animation::Static => panic!("expected animated config"),
    }
}

#[test]
fn static_config_has_no_sequence() {
    let cfg = resolve(&RawParams::new(), &ProfileLimits::still(), now());
    assert!(build_sequence(&cfg, now()).is_none());
}

#[test]
fn whole_second_sequence_is_exact_progression() {
    let cfg = animated(&[("dur", "120"), ("to", "2026-10-21T12:00:00Z")]);
    let seq = build_sequence(&cfg, now()).unwrap();
    assert_eq!(seq.len(), 120);
    assert_eq!(seq.loop_count, LOOP_FOREVER);

    let first = seq.frames[0].remaining.total_seconds();
    assert_eq!(first, 2 * 86_400);
    for (i, frame) in seq.frames.iter().enumerate() {
        assert_eq!(frame.tick, TickIndex(i as u64));
        assert_eq!(frame.delay_ms, 1000);
        assert_eq!(frame.remaining.total_seconds(), first - i as u64);
    }
    assert_eq!(seq.total_delay_ms(), 120_000);
}

#[test]
fn partial_second_start_is_floored_once() {
    let cfg = animated(&[("dur", "5")]);
    let spec = spec_of(&cfg);
    let seq = build_sequence_from(&cfg, &spec, CapturedStart::from_millis(10_999));
    let secs: Vec<u64> = seq
        .frames
        .iter()
        .map(|f| f.remaining.total_seconds())
        .collect();
    assert_eq!(secs, [10, 9, 8, 7, 6]);
}

#[test]
fn passed_deadline_holds_at_zero() {
    let cfg = animated(&[("to", "2020-01-01T00:00:00Z"), ("dur", "30")]);
    let seq = build_sequence(&cfg, now()).unwrap();
    assert_eq!(seq.len(), 30);
    assert!(seq.frames.iter().all(|f| f.remaining.is_zero()));
}

#[test]
fn countdown_reaching_zero_mid_sequence_stays_at_zero() {
    let cfg = animated(&[("dur", "10")]);
    let spec = spec_of(&cfg);
    let seq = build_sequence_from(&cfg, &spec, CapturedStart::from_secs(3));
    let secs: Vec<u64> = seq
        .frames
        .iter()
        .map(|f| f.remaining.total_seconds())
        .collect();
    assert_eq!(secs, [3, 2, 1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn fractional_cadence_steps_by_interval() {
    let cfg = animated(&[("dur", "3"), ("fps", "4")]);
    let spec = spec_of(&cfg);
    let seq = build_sequence_from(&cfg, &spec, CapturedStart::from_millis(100_000));
    assert_eq!(seq.len(), 12);
    assert!(seq.frames.iter().all(|f| f.delay_ms == 250));
    let secs: Vec<u64> = seq
        .frames
        .iter()
        .map(|f| f.remaining.total_seconds())
        .collect();
    assert_eq!(secs, [100, 99, 99, 99, 99, 98, 98, 98, 98, 97, 97, 97]);
}

#[test]
fn same_start_gives_identical_scenes() {
    let cfg = animated(&[("dur", "20"), ("to", "2027-01-01")]);
    let a = build_sequence(&cfg, now()).unwrap();
    let b = build_sequence(&cfg, now()).unwrap();
    assert_eq!(a.len(), b.len());
    for (fa, fb) in a.frames.iter().zip(&b.frames) {
        assert_eq!(fa.scene.to_json().unwrap(), fb.scene.to_json().unwrap());
    }
}

#[test]
fn captured_start_ignores_later_wall_clock() {
    let cfg = animated(&[("dur", "10")]);
    let spec = spec_of(&cfg);
    let start = CapturedStart::capture(cfg.target, now());
    let direct = build_sequence_from(&cfg, &spec, start);
    assert_eq!(build_sequence(&cfg, now()).unwrap(), direct);
    // Capturing later shifts the whole window instead of individual frames.
    let later = build_sequence(&cfg, now() + TimeDelta::seconds(4)).unwrap();
    assert_eq!(
        later.frames[0].remaining.total_seconds() + 4,
        direct.frames[0].remaining.total_seconds()
    );
}

#[test]
fn blinking_alternates_separator_opacity() {
    let cfg = animated(&[("dur", "4"), ("blink", "on")]);
    let seq = build_sequence(&cfg, now()).unwrap();
    let opacities: Vec<f64> = seq
        .frames
        .iter()
        .map(|f| {
            f.scene
                .primitives
                .iter()
                .find_map(|p| match p {
                    crate::scene::model::Primitive::FittedText(t) if t.text == ":" => {
                        Some(t.opacity)
                    }
                    _ => None,
                })
                .unwrap()
        })
        .collect();
    assert_eq!(opacities, [1.0, 0.0, 1.0, 0.0]);
}
