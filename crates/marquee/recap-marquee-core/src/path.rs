//! Arched quadratic path the glyphs travel along.
//!
//! Endpoints sit `spread` pixels either side of the container's horizontal
//! center at `height * baseline_ratio`; the control point sits `2 * arch`
//! above the baseline so the apex is `arch` above the endpoints. Only a resize
//! recomputes it.

use serde::{Deserialize, Serialize};

use crate::config::PathConfig;
use crate::error::MarqueeError;
use crate::phase::PHASE_SPAN;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Position on the path plus the tangent angle in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub angle_deg: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    pub width: f64,
    pub height: f64,
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl CurvePath {
    pub fn compute(width: f64, height: f64, cfg: &PathConfig) -> Result<Self, MarqueeError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MarqueeError::InvalidDimensions { width, height });
        }
        let cx = width / 2.0;
        let baseline = height * cfg.baseline_ratio;
        Ok(Self {
            width,
            height,
            start: Point {
                x: cx - cfg.spread,
                y: baseline,
            },
            control: Point {
                x: cx,
                y: baseline - 2.0 * cfg.arch,
            },
            end: Point {
                x: cx + cfg.spread,
                y: baseline,
            },
        })
    }

    /// SVG path data, usable as a CSS `offset-path`.
    pub fn svg_d(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }

    /// Point at `percent` (0..100) of the parameter range.
    pub fn point_at(&self, percent: f64) -> PathPoint {
        let t = (percent / PHASE_SPAN).clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (p0, p1, p2) = (self.start, self.control, self.end);
        let x = u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x;
        let y = u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y;
        let dx = 2.0 * u * (p1.x - p0.x) + 2.0 * t * (p2.x - p1.x);
        let dy = 2.0 * u * (p1.y - p0.y) + 2.0 * t * (p2.y - p1.y);
        PathPoint {
            x,
            y,
            angle_deg: dy.atan2(dx).to_degrees(),
        }
    }
}
