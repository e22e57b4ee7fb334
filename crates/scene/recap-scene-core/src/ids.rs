//! Scene identifiers.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Id adopted when nothing else names a scene.
pub const DEFAULT_INITIAL_SCENE: &str = "loading";

/// Opaque string key naming one scene in a [`SceneRegistry`](crate::SceneRegistry).
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse an address fragment (`#techResult`, `techResult`) into an id.
    /// Returns `None` for an empty fragment.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment).trim();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Fragment form written to the address bar.
    pub fn to_fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SceneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SceneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SceneId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for SceneId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SceneId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
