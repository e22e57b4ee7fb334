//! Viewport gating for the frame loop.

use serde::{Deserialize, Serialize};

/// Maps intersection ratios to an "in view" flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportGate {
    pub threshold: f64,
    /// Stay in view forever after the first trigger.
    pub once: bool,
    in_view: bool,
    triggered: bool,
}

impl Default for ViewportGate {
    fn default() -> Self {
        Self::new(0.0, false)
    }
}

impl ViewportGate {
    pub fn new(threshold: f64, once: bool) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            once,
            in_view: false,
            triggered: false,
        }
    }

    /// Feed an intersection ratio in [0, 1]. Returns the resulting flag.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.once && self.triggered {
            return true;
        }
        let ratio = if ratio.is_finite() { ratio } else { 0.0 };
        self.in_view = ratio > 0.0 && ratio >= self.threshold;
        if self.in_view {
            self.triggered = true;
        }
        self.in_view
    }

    #[inline]
    pub fn in_view(&self) -> bool {
        self.in_view || (self.once && self.triggered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_gates_entry() {
        let mut gate = ViewportGate::new(0.3, false);
        assert!(!gate.observe(0.2));
        assert!(gate.observe(0.3));
        assert!(!gate.observe(0.0));
    }

    #[test]
    fn once_latches() {
        let mut gate = ViewportGate::new(0.1, true);
        assert!(!gate.observe(0.0));
        assert!(gate.observe(0.5));
        assert!(gate.observe(0.0));
        assert!(gate.in_view());
    }
}
