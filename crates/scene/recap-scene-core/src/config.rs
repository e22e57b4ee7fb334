//! Navigator configuration.

use serde::{Deserialize, Serialize};

use crate::transition::TransitionSpec;

/// What to do when the address fragment names a scene the registry lacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFragmentPolicy {
    /// Adopt the registry's initial scene.
    #[default]
    FallbackToInitial,
    /// Keep the current scene untouched.
    Ignore,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Programmatic navigation pushes a history entry; otherwise it replaces.
    pub push_on_navigate: bool,
    pub unknown_fragment: UnknownFragmentPolicy,
    pub transition: TransitionSpec,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            push_on_navigate: true,
            unknown_fragment: UnknownFragmentPolicy::FallbackToInitial,
            transition: TransitionSpec::default(),
        }
    }
}
