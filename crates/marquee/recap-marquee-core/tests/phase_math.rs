use approx::assert_abs_diff_eq;
use recap_marquee_core::{wrap_percent, Direction, MarqueeConfig, Phase, Swipe, PHASE_SPAN};

const FRAME_S: f64 = 1.0 / 60.0;

fn circular_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(PHASE_SPAN - d)
}

#[test]
fn wrap_stays_in_range_and_is_periodic() {
    let samples = [
        -12345.678, -250.5, -100.0, -99.99, -42.0, -0.5, 0.0, 0.25, 41.9, 58.0, 99.5, 100.0,
        100.75, 333.3, 98765.4321,
    ];
    for x in samples {
        let w = wrap_percent(x);
        assert!((0.0..PHASE_SPAN).contains(&w), "wrap({x}) = {w}");
        let shifted = wrap_percent(x + PHASE_SPAN);
        assert!(circular_gap(w, shifted) < 1e-9, "wrap({x})={w} vs {shifted}");
    }
}

#[test]
fn velocity_decays_to_exact_zero_within_bound() {
    let cfg = MarqueeConfig::default();
    let mut phase = Phase::new(&cfg);
    phase.velocity = 10.0;

    let mut steps = 0;
    while phase.velocity != 0.0 {
        phase.step(FRAME_S, &cfg);
        steps += 1;
        assert!(steps <= 200, "velocity never settled");
    }
    assert!((134..=136).contains(&steps), "settled after {steps} steps");

    for _ in 0..500 {
        phase.step(FRAME_S, &cfg);
        assert_eq!(phase.velocity, 0.0);
    }
}

#[test]
fn settled_velocity_keeps_last_swipe_direction() {
    let cfg = MarqueeConfig::default();
    let mut phase = Phase::new(&cfg);
    assert_eq!(phase.direction, Direction::Left);

    phase.apply_swipe(Swipe::Right, &cfg);
    while phase.velocity != 0.0 {
        phase.step(FRAME_S, &cfg);
    }
    assert_eq!(phase.direction, Direction::Right);

    let before = phase.progress;
    phase.step(1.0, &cfg);
    let moved = wrap_percent(phase.progress - before);
    assert!((moved - cfg.drift_speed()).abs() < 1e-9, "drifted {moved}");
}

#[test]
fn swipe_left_moves_backwards_faster_than_drift() {
    let cfg = MarqueeConfig {
        initial_direction: Direction::Right,
        ..MarqueeConfig::default()
    };
    let mut phase = Phase::new(&cfg);
    phase.progress = 50.0;
    phase.apply_swipe(Swipe::Left, &cfg);
    assert_abs_diff_eq!(phase.velocity, -cfg.swipe_speed(), epsilon = 1e-12);

    phase.step(0.1, &cfg);
    assert_abs_diff_eq!(phase.progress, 49.8, epsilon = 1e-9);
    assert_abs_diff_eq!(phase.velocity, -2.0 * 0.95, epsilon = 1e-12);
    assert_eq!(phase.direction, Direction::Left);
}

#[test]
fn huge_step_still_wraps() {
    let cfg = MarqueeConfig::default();
    let mut phase = Phase::new(&cfg);
    phase.step(1.0e7, &cfg);
    assert!((0.0..PHASE_SPAN).contains(&phase.progress));
    phase.step(f64::INFINITY, &cfg);
    assert!((0.0..PHASE_SPAN).contains(&phase.progress));
}
