use approx::assert_abs_diff_eq;
use serde::Deserialize;

use recap_marquee_core::{
    ChangeKind, Direction, GlyphRow, MarqueeConfig, MarqueeEngine, Swipe, ViewportGate,
    PHASE_SPAN,
};
use recap_test_fixtures::marquee;

#[derive(Deserialize)]
struct HeadlineFixture {
    config: MarqueeConfig,
    rows: Vec<GlyphRow>,
}

fn headline_engine() -> MarqueeEngine {
    let fixture: HeadlineFixture = marquee::load("headline-rows").expect("fixture");
    let mut eng = MarqueeEngine::new(fixture.config).expect("config");
    let count = eng.mount_rows(&fixture.rows);
    assert_eq!(count, 29 + 15 + 13);
    eng
}

#[test]
fn default_fixture_matches_builtin_defaults() {
    let cfg = MarqueeConfig::from_json(&marquee::json("default").unwrap()).unwrap();
    assert_eq!(cfg, MarqueeConfig::default());
}

#[test]
fn leaving_view_stops_and_reentry_skips_first_frame() {
    let mut eng = headline_engine();
    assert!(eng.set_in_view(true));
    eng.frame(0.0);
    assert!(eng.frame(16.0).moved);

    assert!(!eng.set_in_view(false));
    assert_eq!(eng.phase().last_frame_ms(), None);
    let progress = eng.progress();
    let out = eng.frame(5_000.0);
    assert!(!out.moved && out.changes.is_empty());
    assert_eq!(eng.progress(), progress);

    assert!(eng.set_in_view(true));
    assert!(!eng.frame(60_000.0).moved);
    assert_eq!(eng.progress(), progress);
    assert!(eng.frame(60_016.0).moved);
}

#[test]
fn hidden_page_polls_as_noop() {
    let mut eng = headline_engine();
    eng.set_in_view(true);
    eng.frame(0.0);
    eng.frame(16.0);

    eng.set_page_hidden(true);
    assert!(eng.wants_frame());
    let progress = eng.progress();
    for i in 0..5 {
        let out = eng.frame(32.0 + i as f64 * 16.0);
        assert!(!out.moved && out.changes.is_empty());
    }
    assert_eq!(eng.progress(), progress);

    eng.set_page_hidden(false);
    assert!(!eng.frame(90_000.0).moved);
    assert_eq!(eng.progress(), progress);
    assert!(eng.frame(90_016.0).moved);
}

#[test]
fn long_gap_is_clamped() {
    let mut eng = MarqueeEngine::new(MarqueeConfig::default()).unwrap();
    eng.mount_rows(&[GlyphRow {
        text: "A".into(),
        base_offset: 0.0,
    }]);
    eng.set_in_view(true);
    eng.frame(0.0);
    eng.frame(10_000_000.0);
    assert_abs_diff_eq!(eng.progress(), PHASE_SPAN - 0.25, epsilon = 1e-9);
}

#[test]
fn unclamped_config_accepts_one_big_step() {
    let cfg = MarqueeConfig {
        max_frame_delta_s: None,
        initial_direction: Direction::Right,
        ..MarqueeConfig::default()
    };
    let mut eng = MarqueeEngine::new(cfg).unwrap();
    eng.mount_rows(&[GlyphRow {
        text: "A".into(),
        base_offset: 0.0,
    }]);
    eng.set_in_view(true);
    eng.frame(0.0);
    eng.frame(123_500.0);
    assert_abs_diff_eq!(eng.progress(), 23.5, epsilon = 1e-9);
}

#[test]
fn swipe_reverses_drift_permanently() {
    let mut eng = headline_engine();
    eng.set_in_view(true);
    assert_eq!(eng.direction(), Direction::Left);

    eng.swipe(Swipe::Right);
    let mut t = 0.0;
    eng.frame(t);
    let mut frames = 0;
    while eng.velocity() != 0.0 {
        t += 16.0;
        eng.frame(t);
        frames += 1;
        assert!(frames < 1_000);
    }
    assert_eq!(eng.direction(), Direction::Right);

    let before = eng.progress();
    t += 16.0;
    eng.frame(t);
    assert!(eng.progress() > before || eng.progress() < 1.0);
}

#[test]
fn resize_failure_keeps_last_path() {
    let mut eng = headline_engine();
    assert!(eng.resize(1200.0, 800.0));
    let path = *eng.path().unwrap();
    assert!(!eng.resize(0.0, 0.0));
    assert_eq!(eng.path(), Some(&path));
    assert!(!eng.resize(1200.0, 800.0));
    assert!(eng.resize(900.0, 800.0));
}

#[test]
fn places_before_first_resize_carry_no_point() {
    let mut eng = headline_engine();
    eng.set_in_view(true);
    let out = eng.frame(0.0);
    assert!(out
        .changes
        .iter()
        .all(|c| !matches!(c.kind, ChangeKind::Place { point: Some(_), .. })));
}

#[test]
fn trigger_once_gate_keeps_loop_running() {
    let mut eng = headline_engine();
    eng.set_viewport_gate(ViewportGate::new(0.25, true));
    assert!(!eng.observe_intersection(0.1));
    assert!(eng.observe_intersection(0.4));
    assert!(eng.observe_intersection(0.0));
    eng.frame(0.0);
    assert!(eng.frame(16.0).moved);
}

#[test]
fn remount_rebuilds_arena() {
    let mut eng = headline_engine();
    eng.set_in_view(true);
    eng.frame(0.0);
    assert!(eng.elements().iter().any(|e| !e.last_visible));

    let n = eng.mount_rows(&[GlyphRow {
        text: "NEW".into(),
        base_offset: 0.0,
    }]);
    assert_eq!(n, 3);
    assert!(eng.elements().iter().all(|e| e.last_visible));
    assert!(!eng.frame(16.0).moved);
}
