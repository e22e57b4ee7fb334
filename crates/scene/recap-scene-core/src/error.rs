//! Errors raised while building a scene registry.
//!
//! Navigation itself never fails: unknown targets and fragments are absorbed
//! by the navigator. Only configuration loading can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneError {
    #[error("scene registry parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("initial scene '{id}' is not present in the registry")]
    MissingInitial { id: String },

    #[error("scene ids must not be empty")]
    EmptyId,

    #[error("scene '{id}' has no descriptor to attach a branch to")]
    UnknownScene { id: String },
}

impl SceneError {
    /// Short category label used in diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::MissingInitial { .. } | Self::EmptyId | Self::UnknownScene { .. } => "registry",
        }
    }
}
