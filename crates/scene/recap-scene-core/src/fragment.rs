//! Bookmarkable state port.
//!
//! The navigator mirrors its current scene into an address fragment through
//! [`FragmentStore`]. Browsers back it with the History API; tests and other
//! hosts use [`MemoryFragmentStore`].

use serde::{Deserialize, Serialize};

use crate::ids::SceneId;

/// How a fragment write interacts with the host's history stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMode {
    /// Add a new history entry (one per programmatic transition).
    Push,
    /// Overwrite the current entry.
    Replace,
}

pub trait FragmentStore {
    /// Current fragment, without the leading `#`. `None` when empty.
    fn read(&self) -> Option<String>;
    fn write(&mut self, id: &SceneId, mode: HistoryMode);
}

/// One recorded write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentWrite {
    pub fragment: String,
    pub mode: HistoryMode,
}

/// In-memory store with a simulated history stack.
#[derive(Clone, Debug, Default)]
pub struct MemoryFragmentStore {
    current: Option<String>,
    history: Vec<Option<String>>,
    writes: Vec<FragmentWrite>,
}

impl MemoryFragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose address bar already reads `fragment`.
    pub fn with_fragment(fragment: &str) -> Self {
        let mut store = Self::default();
        store.set_external(fragment);
        store
    }

    /// Simulate the user editing the address bar or following a link.
    pub fn set_external(&mut self, fragment: &str) {
        self.current = SceneId::from_fragment(fragment).map(|id| id.as_str().to_string());
    }

    /// Simulate the back button. Returns the fragment now showing.
    pub fn back(&mut self) -> Option<String> {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
        }
        self.current.clone()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn writes(&self) -> &[FragmentWrite] {
        &self.writes
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl FragmentStore for MemoryFragmentStore {
    fn read(&self) -> Option<String> {
        self.current.clone()
    }

    fn write(&mut self, id: &SceneId, mode: HistoryMode) {
        if mode == HistoryMode::Push {
            self.history.push(self.current.clone());
        }
        self.current = Some(id.as_str().to_string());
        self.writes.push(FragmentWrite {
            fragment: id.to_fragment(),
            mode,
        });
    }
}
