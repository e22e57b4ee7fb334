//! Marquee configuration.
//!
//! Every field has a default matching the shipped experience, so an empty
//! JSON object (`{}`) is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::MarqueeError;
use crate::gesture::Direction;

/// Phase sub-range in which glyphs are rendered (exclusive on both ends).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub min: f64,
    pub max: f64,
}

impl VisibleWindow {
    #[inline]
    pub fn contains(&self, distance: f64) -> bool {
        self.min < distance && distance < self.max
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self {
            min: 42.0,
            max: 58.0,
        }
    }
}

/// Arched path geometry, in container pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Horizontal distance of each endpoint from the container's center.
    pub spread: f64,
    /// Height of the apex above the endpoints.
    pub arch: f64,
    /// Endpoint height as a fraction of the container height.
    pub baseline_ratio: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            spread: 420.0,
            arch: 140.0,
            baseline_ratio: 0.75,
        }
    }
}

/// Pointer swipe thresholds for the built-in detector.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub min_distance_px: f64,
    pub min_velocity_px_per_ms: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance_px: 10.0,
            min_velocity_px_per_ms: 0.3,
        }
    }
}

/// Bounded polling for a host capability (e.g. a gesture library).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub interval_ms: u32,
    pub max_attempts: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_attempts: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Velocities at or below this magnitude count as settled.
    pub epsilon: f64,
    /// Per-frame velocity multiplier.
    pub decay: f64,
    /// Auto-drift speed; scaled by 100 into percent per second.
    pub auto_speed: f64,
    /// Swipe velocity as a multiple of the auto-drift speed.
    pub gesture_multiplier: f64,
    /// Phase distance between neighbouring glyphs of one row.
    pub char_spacing: f64,
    pub window: VisibleWindow,
    pub initial_direction: Direction,
    /// Largest frame delta applied in one step; `None` accepts any delta.
    pub max_frame_delta_s: Option<f64>,
    pub path: PathConfig,
    pub swipe: SwipeConfig,
    pub probe: ProbeConfig,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            decay: 0.95,
            auto_speed: 0.01,
            gesture_multiplier: 2.0,
            char_spacing: 0.32,
            window: VisibleWindow::default(),
            initial_direction: Direction::Left,
            max_frame_delta_s: Some(0.25),
            path: PathConfig::default(),
            swipe: SwipeConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl MarqueeConfig {
    pub fn from_json(json: &str) -> Result<Self, MarqueeError> {
        let cfg: MarqueeConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Auto-drift speed in percent per second.
    #[inline]
    pub fn drift_speed(&self) -> f64 {
        self.auto_speed * 100.0
    }

    /// Magnitude of the velocity injected by one swipe.
    #[inline]
    pub fn swipe_speed(&self) -> f64 {
        self.drift_speed() * self.gesture_multiplier
    }

    pub fn validate(&self) -> Result<(), MarqueeError> {
        fn finite(field: &'static str, v: f64) -> Result<(), MarqueeError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(MarqueeError::config(field, format!("{v} is not finite")))
            }
        }

        finite("epsilon", self.epsilon)?;
        finite("decay", self.decay)?;
        finite("auto_speed", self.auto_speed)?;
        finite("gesture_multiplier", self.gesture_multiplier)?;
        finite("char_spacing", self.char_spacing)?;
        finite("path.spread", self.path.spread)?;
        finite("path.arch", self.path.arch)?;
        finite("path.baseline_ratio", self.path.baseline_ratio)?;
        finite("swipe.min_distance_px", self.swipe.min_distance_px)?;
        finite("swipe.min_velocity_px_per_ms", self.swipe.min_velocity_px_per_ms)?;
        if self.epsilon <= 0.0 {
            return Err(MarqueeError::config("epsilon", "must be positive"));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(MarqueeError::config("decay", "must lie in (0, 1)"));
        }
        if self.auto_speed < 0.0 || self.gesture_multiplier < 0.0 {
            return Err(MarqueeError::config(
                "auto_speed",
                "speeds must not be negative",
            ));
        }
        if self.char_spacing < 0.0 {
            return Err(MarqueeError::config("char_spacing", "must not be negative"));
        }
        if self.path.spread <= 0.0 {
            return Err(MarqueeError::config("path.spread", "must be positive"));
        }
        if self.path.arch < 0.0 {
            return Err(MarqueeError::config("path.arch", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.path.baseline_ratio) {
            return Err(MarqueeError::config("path.baseline_ratio", "must lie in [0, 1]"));
        }
        if self.swipe.min_distance_px < 0.0 || self.swipe.min_velocity_px_per_ms < 0.0 {
            return Err(MarqueeError::config("swipe", "thresholds must not be negative"));
        }
        let w = self.window;
        if !(0.0..=100.0).contains(&w.min) || !(0.0..=100.0).contains(&w.max) || w.min >= w.max {
            return Err(MarqueeError::config(
                "window",
                format!("[{}, {}] is not an ordered range inside [0, 100]", w.min, w.max),
            ));
        }
        if let Some(max) = self.max_frame_delta_s {
            if !(max.is_finite() && max > 0.0) {
                return Err(MarqueeError::config(
                    "max_frame_delta_s",
                    "must be positive when set",
                ));
            }
        }
        if self.probe.interval_ms == 0 {
            return Err(MarqueeError::config("probe.interval_ms", "must be positive"));
        }
        Ok(())
    }
}
