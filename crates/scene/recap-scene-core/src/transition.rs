//! Enter/exit motion applied when the current scene changes.
//!
//! The incoming view slides up from `enter_offset_y` to 0 while fading in; the
//! outgoing view slides from 0 to `exit_offset_y` while fading out. Hosts
//! either play the two halves back to back (`Sequential`) or overlap them
//! (`CrossFade`).

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// The next view starts entering once the previous one has exited.
    #[default]
    Sequential,
    /// Exit and enter run concurrently.
    CrossFade,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    /// Seconds spent on each half (enter or exit).
    pub duration_s: f32,
    pub enter_offset_y: f32,
    pub exit_offset_y: f32,
    pub mode: TransitionMode,
    pub easing: Easing,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration_s: 0.5,
            enter_offset_y: 50.0,
            exit_offset_y: -50.0,
            mode: TransitionMode::Sequential,
            easing: Easing::EaseOut,
        }
    }
}

/// Style of one view at a point in its transition.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewStyle {
    pub offset_y: f32,
    pub opacity: f32,
}

impl ViewStyle {
    pub const SETTLED: ViewStyle = ViewStyle {
        offset_y: 0.0,
        opacity: 1.0,
    };
}

/// Styles of the outgoing and incoming views at one instant.
/// `None` means the view is not mounted at that instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionSample {
    pub exiting: Option<ViewStyle>,
    pub entering: Option<ViewStyle>,
}

impl TransitionSpec {
    /// Total wall time from the start of the exit to the end of the enter.
    pub fn total_duration(&self) -> f32 {
        match self.mode {
            TransitionMode::Sequential => self.duration_s * 2.0,
            TransitionMode::CrossFade => self.duration_s,
        }
    }

    fn progress(&self, elapsed: f32) -> f32 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed / self.duration_s)
    }

    /// Style of the incoming view `elapsed` seconds into its enter half.
    pub fn enter_at(&self, elapsed: f32) -> ViewStyle {
        let p = self.progress(elapsed);
        ViewStyle {
            offset_y: self.enter_offset_y * (1.0 - p),
            opacity: p,
        }
    }

    /// Style of the outgoing view `elapsed` seconds into its exit half.
    pub fn exit_at(&self, elapsed: f32) -> ViewStyle {
        let p = self.progress(elapsed);
        ViewStyle {
            offset_y: self.exit_offset_y * p,
            opacity: 1.0 - p,
        }
    }

    /// Sample both views `elapsed` seconds after a scene change.
    pub fn sample(&self, elapsed: f32) -> TransitionSample {
        let elapsed = elapsed.max(0.0);
        match self.mode {
            TransitionMode::Sequential => {
                if elapsed < self.duration_s {
                    TransitionSample {
                        exiting: Some(self.exit_at(elapsed)),
                        entering: None,
                    }
                } else {
                    TransitionSample {
                        exiting: None,
                        entering: Some(self.enter_at(elapsed - self.duration_s)),
                    }
                }
            }
            TransitionMode::CrossFade => TransitionSample {
                exiting: (elapsed < self.duration_s).then(|| self.exit_at(elapsed)),
                entering: Some(self.enter_at(elapsed)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_exit_endpoints_match_defaults() {
        let spec = TransitionSpec {
            easing: Easing::Linear,
            ..TransitionSpec::default()
        };
        assert_eq!(spec.enter_at(0.0), ViewStyle { offset_y: 50.0, opacity: 0.0 });
        assert_eq!(spec.enter_at(0.5), ViewStyle::SETTLED);
        assert_eq!(spec.exit_at(0.0), ViewStyle::SETTLED);
        assert_eq!(spec.exit_at(0.5), ViewStyle { offset_y: -50.0, opacity: 0.0 });
    }

    #[test]
    fn sequential_never_overlaps_views() {
        let spec = TransitionSpec::default();
        for step in 0..=20 {
            let s = spec.sample(step as f32 * 0.05);
            assert!(!(s.exiting.is_some() && s.entering.is_some()));
        }
        assert_eq!(spec.total_duration(), 1.0);
    }

    #[test]
    fn cross_fade_overlaps_during_first_half() {
        let spec = TransitionSpec {
            mode: TransitionMode::CrossFade,
            ..TransitionSpec::default()
        };
        let mid = spec.sample(0.25);
        assert!(mid.exiting.is_some() && mid.entering.is_some());
        let done = spec.sample(0.6);
        assert!(done.exiting.is_none());
        assert_eq!(done.entering, Some(ViewStyle::SETTLED));
    }

    #[test]
    fn zero_duration_snaps_to_settled() {
        let spec = TransitionSpec {
            duration_s: 0.0,
            ..TransitionSpec::default()
        };
        assert_eq!(spec.enter_at(0.0), ViewStyle::SETTLED);
    }
}
