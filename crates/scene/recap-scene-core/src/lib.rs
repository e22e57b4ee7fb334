//! Recap Scene Core (host-agnostic)
//!
//! A small navigation state machine: an immutable [`SceneRegistry`] maps scene
//! ids to views and transition rules, and a [`SceneNavigator`] owns the current
//! id, mirrors it into an address fragment through a [`FragmentStore`], and
//! reports which view to mount. Unknown ids never fail; they render an
//! end-of-content view.

pub mod config;
pub mod error;
pub mod fragment;
pub mod ids;
pub mod navigator;
pub mod registry;
pub mod transition;

// Re-exports for consumers (adapters)
pub use config::{SceneConfig, UnknownFragmentPolicy};
pub use error::SceneError;
pub use fragment::{FragmentStore, FragmentWrite, HistoryMode, MemoryFragmentStore};
pub use ids::{SceneId, DEFAULT_INITIAL_SCENE};
pub use navigator::{ChangeCause, SceneChange, SceneNavigator, SceneView};
pub use registry::{
    BranchFn, NextDoc, NextRule, RegistryDoc, SceneDescriptor, SceneDoc, SceneRegistry,
    SceneRegistryBuilder,
};
pub use transition::{Easing, TransitionMode, TransitionSample, TransitionSpec, ViewStyle};
