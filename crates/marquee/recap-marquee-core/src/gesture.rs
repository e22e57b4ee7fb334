//! Gesture input: discrete swipes and the pointer-based fallback detector.

use serde::{Deserialize, Serialize};

use crate::config::SwipeConfig;

/// Sign of the auto-drift.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Swipe {
    Left,
    Right,
}

impl Swipe {
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Swipe::Left => Direction::Left,
            Swipe::Right => Direction::Right,
        }
    }

    /// Parse the event names emitted by gesture libraries (`swipeleft`, `swipe-left`, `left`).
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "swipeleft" | "left" => Some(Swipe::Left),
            "swiperight" | "right" => Some(Swipe::Right),
            _ => None,
        }
    }
}

/// One pointer position sample.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub t_ms: f64,
}

/// Turns a pointer down/up pair into a horizontal swipe.
#[derive(Clone, Debug, Default)]
pub struct SwipeDetector {
    cfg: SwipeConfig,
    start: Option<PointerSample>,
}

impl SwipeDetector {
    pub fn new(cfg: SwipeConfig) -> Self {
        Self { cfg, start: None }
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.start = Some(sample);
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Finish the gesture. Requires enough horizontal travel, horizontal
    /// dominance, and enough speed.
    pub fn pointer_up(&mut self, end: PointerSample) -> Option<Swipe> {
        let start = self.start.take()?;
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        if !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        if dx.abs() < self.cfg.min_distance_px || dx.abs() <= dy.abs() {
            return None;
        }
        let dt = end.t_ms - start.t_ms;
        if dt > 0.0 && dx.abs() / dt < self.cfg.min_velocity_px_per_ms {
            return None;
        }
        Some(if dx < 0.0 { Swipe::Left } else { Swipe::Right })
    }
}
