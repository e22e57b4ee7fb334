//! SceneNavigator: owns the current scene id, resolves transitions, and keeps
//! the address fragment in sync.
//!
//! Methods:
//! - initialize (silent bootstrap from the fragment)
//! - navigate (follow the current scene's rule, optionally with a choice)
//! - on_external_fragment_change (back/forward, pasted links)
//! - render (descriptor lookup, end-of-content fallback)

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::{SceneConfig, UnknownFragmentPolicy};
use crate::fragment::{FragmentStore, HistoryMode};
use crate::ids::SceneId;
use crate::registry::SceneRegistry;
use crate::transition::TransitionSpec;

/// Why the current scene changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    Navigate { choice: Option<String> },
    /// The fragment named a known scene.
    External,
    /// The fragment was empty or unknown; the initial scene was adopted.
    Fallback,
}

/// Record of one state mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneChange {
    pub from: SceneId,
    pub to: SceneId,
    pub cause: ChangeCause,
    /// Remount key of the new view.
    pub mount_key: u64,
}

/// What the host should display for the current state.
#[derive(Debug)]
pub enum SceneView<'a, V> {
    Scene {
        id: &'a SceneId,
        view: &'a V,
        props: Option<&'a JsonValue>,
        /// Changes on every scene change; hosts key the mounted view on it so a
        /// change always remounts.
        mount_key: u64,
        transition: &'a TransitionSpec,
    },
    /// The current id has no descriptor.
    EndOfContent { id: &'a SceneId },
}

impl<V> SceneView<'_, V> {
    pub fn id(&self) -> &SceneId {
        match self {
            SceneView::Scene { id, .. } | SceneView::EndOfContent { id } => id,
        }
    }

    pub fn is_end_of_content(&self) -> bool {
        matches!(self, SceneView::EndOfContent { .. })
    }
}

#[derive(Debug)]
pub struct SceneNavigator<V, F: FragmentStore> {
    registry: SceneRegistry<V>,
    store: F,
    cfg: SceneConfig,
    current: SceneId,
    mount_key: u64,
}

impl<V, F: FragmentStore> SceneNavigator<V, F> {
    /// Create a navigator sitting on the registry's initial scene. Call
    /// [`initialize`](Self::initialize) before the first render.
    pub fn new(registry: SceneRegistry<V>, store: F, cfg: SceneConfig) -> Self {
        Self {
            current: registry.initial().clone(),
            registry,
            store,
            cfg,
            mount_key: 0,
        }
    }

    /// Adopt the scene named by the fragment, else the initial scene.
    /// Bootstrapping is not a transition: no change is reported.
    pub fn initialize(&mut self) -> &SceneId {
        let requested = self.store.read().as_deref().and_then(SceneId::from_fragment);
        self.current = match requested {
            Some(id) if self.registry.contains(id.as_str()) => id,
            Some(id) => {
                log::warn!("ignoring unknown scene '{id}' in fragment at startup");
                self.registry.initial().clone()
            }
            None => self.registry.initial().clone(),
        };
        self.sync_fragment(HistoryMode::Replace);
        &self.current
    }

    /// Follow the current scene's rule. Returns the change, or `None` when the
    /// rule resolves to the current scene or the scene has no successor.
    /// From end-of-content the navigator recovers to the initial scene.
    pub fn navigate(&mut self, choice: Option<&str>) -> Option<SceneChange> {
        let Some(desc) = self.registry.get(self.current.as_str()) else {
            log::warn!(
                "navigate from end-of-content scene '{}'; recovering to '{}'",
                self.current,
                self.registry.initial()
            );
            let initial = self.registry.initial().clone();
            let change = self.apply(initial, ChangeCause::Fallback);
            self.sync_fragment(self.navigate_mode());
            return Some(change);
        };
        let target = desc.next.resolve(choice)?;
        log::info!("navigate from={} choice={:?} to={target}", self.current, choice);
        if target == self.current {
            return None;
        }
        if !self.registry.contains(target.as_str()) {
            log::warn!("scene '{}' resolved to unknown scene '{target}'", self.current);
        }
        let change = self.apply(
            target,
            ChangeCause::Navigate {
                choice: choice.map(str::to_string),
            },
        );
        self.sync_fragment(self.navigate_mode());
        Some(change)
    }

    fn navigate_mode(&self) -> HistoryMode {
        if self.cfg.push_on_navigate {
            HistoryMode::Push
        } else {
            HistoryMode::Replace
        }
    }

    /// Re-read the fragment after the host reports it changed (back/forward
    /// or a followed link).
    pub fn on_external_fragment_change(&mut self) -> Option<SceneChange> {
        let requested = self.store.read().as_deref().and_then(SceneId::from_fragment);
        let (target, cause) = match requested {
            Some(id) if self.registry.contains(id.as_str()) => (id, ChangeCause::External),
            Some(id) => match self.cfg.unknown_fragment {
                UnknownFragmentPolicy::FallbackToInitial => {
                    log::warn!("unknown scene '{id}' in fragment; falling back");
                    (self.registry.initial().clone(), ChangeCause::Fallback)
                }
                UnknownFragmentPolicy::Ignore => {
                    log::warn!("unknown scene '{id}' in fragment; ignored");
                    return None;
                }
            },
            None => (self.registry.initial().clone(), ChangeCause::Fallback),
        };
        let change = if target == self.current {
            None
        } else {
            log::debug!("fragment change {} -> {target}", self.current);
            Some(self.apply(target, cause))
        };
        self.sync_fragment(HistoryMode::Replace);
        change
    }

    pub fn render(&self) -> SceneView<'_, V> {
        match self.registry.get(self.current.as_str()) {
            Some(desc) => SceneView::Scene {
                id: &self.current,
                view: &desc.view,
                props: desc.props.as_ref(),
                mount_key: self.mount_key,
                transition: &self.cfg.transition,
            },
            None => SceneView::EndOfContent { id: &self.current },
        }
    }

    #[inline]
    pub fn current(&self) -> &SceneId {
        &self.current
    }

    pub fn is_end_of_content(&self) -> bool {
        !self.registry.contains(self.current.as_str())
    }

    #[inline]
    pub fn mount_key(&self) -> u64 {
        self.mount_key
    }

    pub fn registry(&self) -> &SceneRegistry<V> {
        &self.registry
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn store(&self) -> &F {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut F {
        &mut self.store
    }

    fn apply(&mut self, target: SceneId, cause: ChangeCause) -> SceneChange {
        let from = std::mem::replace(&mut self.current, target);
        self.mount_key = self.mount_key.wrapping_add(1);
        SceneChange {
            from,
            to: self.current.clone(),
            cause,
            mount_key: self.mount_key,
        }
    }

    /// Write the current id unless the fragment already shows it.
    fn sync_fragment(&mut self, mode: HistoryMode) {
        if self.store.read().as_deref() == Some(self.current.as_str()) {
            return;
        }
        self.store.write(&self.current, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::MemoryFragmentStore;
    use crate::registry::{NextRule, SceneDescriptor};

    fn chain() -> SceneRegistry<&'static str> {
        SceneRegistry::builder("a")
            .scene("a", SceneDescriptor::new("A", "b"))
            .scene("b", SceneDescriptor::new("B", "c"))
            .scene("c", SceneDescriptor::new("C", NextRule::End))
            .build()
            .unwrap()
    }

    #[test]
    fn navigate_moves_once_per_call() {
        let mut nav = SceneNavigator::new(chain(), MemoryFragmentStore::new(), SceneConfig::default());
        nav.initialize();
        let first = nav.navigate(None).unwrap();
        assert_eq!((first.from.as_str(), first.to.as_str()), ("a", "b"));
        let second = nav.navigate(None).unwrap();
        assert_eq!((second.from.as_str(), second.to.as_str()), ("b", "c"));
        assert_eq!(nav.navigate(None), None);
        assert_eq!(nav.current(), "c");
    }

    #[test]
    fn mount_key_changes_on_every_change() {
        let mut nav = SceneNavigator::new(chain(), MemoryFragmentStore::new(), SceneConfig::default());
        nav.initialize();
        let k0 = nav.mount_key();
        nav.navigate(None);
        let k1 = nav.mount_key();
        nav.navigate(None);
        assert!(k0 != k1 && k1 != nav.mount_key());
    }

    #[test]
    fn self_loop_is_a_noop() {
        let reg = SceneRegistry::builder("a")
            .scene("a", SceneDescriptor::new("A", "a"))
            .build()
            .unwrap();
        let mut nav = SceneNavigator::new(reg, MemoryFragmentStore::new(), SceneConfig::default());
        nav.initialize();
        let writes = nav.store().writes().len();
        assert_eq!(nav.navigate(None), None);
        assert_eq!(nav.store().writes().len(), writes);
    }
}
