//! Output contracts from the marquee engine.
//!
//! Outputs carry only the per-element side effects for this frame, keyed by
//! element index in mount order. Adapters keep a parallel array of host
//! handles and apply each change to `handles[index]`.

use serde::{Deserialize, Serialize};

use crate::path::PathPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChangeKind {
    Show,
    Hide,
    /// Place the element at `distance` percent along the path.
    /// `point` is present once a path has been computed.
    Place {
        distance: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        point: Option<PathPoint>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementChange {
    pub index: u32,
    pub kind: ChangeKind,
}

/// Returned by `MarqueeEngine::frame()`. The buffer is reused across frames.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FrameOutputs {
    pub progress: f64,
    pub velocity: f64,
    /// False for skipped frames (first after a reset, hidden page, out of view).
    pub moved: bool,
    #[serde(default)]
    pub changes: Vec<ElementChange>,
}

impl FrameOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.moved = false;
        self.changes.clear();
    }

    #[inline]
    pub fn push_change(&mut self, index: u32, kind: ChangeKind) {
        self.changes.push(ElementChange { index, kind });
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, pred: impl Fn(&ChangeKind) -> bool) -> usize {
        self.changes.iter().filter(|c| pred(&c.kind)).count()
    }
}
