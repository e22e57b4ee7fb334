//! Global phase: progress, decaying gesture velocity, and persistent drift
//! direction, advanced once per animation frame.

use serde::{Deserialize, Serialize};

use crate::config::MarqueeConfig;
use crate::gesture::{Direction, Swipe};

/// Phase space spans [0, PHASE_SPAN).
pub const PHASE_SPAN: f64 = 100.0;

/// Wrap any value into [0, 100). Correct for negatives; non-finite input maps to 0.
#[inline]
pub fn wrap_percent(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let w = ((x % PHASE_SPAN) + PHASE_SPAN) % PHASE_SPAN;
    // (tiny negative + 100) can round up to exactly 100
    if w >= PHASE_SPAN {
        0.0
    } else {
        w
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub progress: f64,
    pub velocity: f64,
    /// Only swipes change this; it survives velocity settling to zero.
    pub direction: Direction,
    last_frame_ms: Option<f64>,
}

impl Phase {
    pub fn new(cfg: &MarqueeConfig) -> Self {
        Self {
            progress: 0.0,
            velocity: 0.0,
            direction: cfg.initial_direction,
            last_frame_ms: None,
        }
    }

    #[inline]
    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }

    /// Forget the previous frame so the next tick only records its timestamp.
    #[inline]
    pub fn reset_clock(&mut self) {
        self.last_frame_ms = None;
    }

    #[inline]
    pub fn is_gesture_driven(&self, cfg: &MarqueeConfig) -> bool {
        self.velocity.abs() > cfg.epsilon
    }

    /// Advance to the frame stamped `now_ms`. The first frame after a clock
    /// reset only records the timestamp. Returns whether the phase moved.
    pub fn tick(&mut self, now_ms: f64, cfg: &MarqueeConfig) -> bool {
        let Some(prev) = self.last_frame_ms.replace(now_ms) else {
            return false;
        };
        let mut dt_s = (now_ms - prev) / 1000.0;
        if !dt_s.is_finite() || dt_s < 0.0 {
            dt_s = 0.0;
        }
        if let Some(max) = cfg.max_frame_delta_s {
            dt_s = dt_s.min(max);
        }
        self.step(dt_s, cfg);
        true
    }

    /// Apply `dt_s` seconds of motion: decaying gesture velocity if any,
    /// otherwise auto-drift in the persisted direction.
    pub fn step(&mut self, dt_s: f64, cfg: &MarqueeConfig) {
        if self.is_gesture_driven(cfg) {
            self.progress += dt_s * self.velocity;
            self.velocity *= cfg.decay;
            if self.velocity.abs() <= cfg.epsilon {
                self.velocity = 0.0;
            }
        } else {
            self.progress += dt_s * cfg.drift_speed() * self.direction.sign();
        }
        self.progress = wrap_percent(self.progress);
    }

    /// Overwrite direction and velocity with a swipe's impulse.
    pub fn apply_swipe(&mut self, swipe: Swipe, cfg: &MarqueeConfig) {
        self.direction = swipe.direction();
        self.velocity = cfg.swipe_speed() * self.direction.sign();
    }
}
