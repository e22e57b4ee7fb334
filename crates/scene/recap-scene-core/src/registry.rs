//! Scene registry: immutable map from [`SceneId`] to view + transition rule.
//!
//! Registries are built once (from code or JSON) and handed to the navigator
//! by value. Nothing mutates them after construction.

use std::fmt;

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SceneError;
use crate::ids::{SceneId, DEFAULT_INITIAL_SCENE};

/// Host-supplied branch function. Receives the user's choice (never an empty string).
pub type BranchFn = Box<dyn Fn(Option<&str>) -> SceneId>;

/// How a scene picks its successor.
pub enum NextRule {
    Fixed(SceneId),
    /// Data-described branch: look the choice up in `cases`, else `fallback`.
    Branch {
        cases: IndexMap<String, SceneId>,
        fallback: SceneId,
    },
    Dynamic(BranchFn),
    /// Final scene; navigating away is a no-op.
    End,
}

impl NextRule {
    /// Resolve the successor for `choice`. Empty choices count as no choice.
    pub fn resolve(&self, choice: Option<&str>) -> Option<SceneId> {
        let choice = choice.filter(|c| !c.is_empty());
        match self {
            NextRule::Fixed(id) => Some(id.clone()),
            NextRule::Branch { cases, fallback } => Some(
                choice
                    .and_then(|c| cases.get(c))
                    .unwrap_or(fallback)
                    .clone(),
            ),
            NextRule::Dynamic(f) => Some(f(choice)),
            NextRule::End => None,
        }
    }

    /// Statically known targets (dynamic rules have none).
    fn static_targets(&self) -> Vec<&SceneId> {
        match self {
            NextRule::Fixed(id) => vec![id],
            NextRule::Branch { cases, fallback } => {
                cases.values().chain(std::iter::once(fallback)).collect()
            }
            NextRule::Dynamic(_) | NextRule::End => Vec::new(),
        }
    }
}

impl fmt::Debug for NextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextRule::Fixed(id) => f.debug_tuple("Fixed").field(id).finish(),
            NextRule::Branch { cases, fallback } => f
                .debug_struct("Branch")
                .field("cases", cases)
                .field("fallback", fallback)
                .finish(),
            NextRule::Dynamic(_) => f.write_str("Dynamic(..)"),
            NextRule::End => f.write_str("End"),
        }
    }
}

impl From<&str> for NextRule {
    fn from(value: &str) -> Self {
        NextRule::Fixed(SceneId::from(value))
    }
}

/// One registry entry.
#[derive(Debug)]
pub struct SceneDescriptor<V> {
    pub view: V,
    pub next: NextRule,
    /// Static props handed to the view on mount.
    pub props: Option<JsonValue>,
}

impl<V> SceneDescriptor<V> {
    pub fn new(view: V, next: impl Into<NextRule>) -> Self {
        Self {
            view,
            next: next.into(),
            props: None,
        }
    }

    pub fn with_props(mut self, props: JsonValue) -> Self {
        self.props = Some(props);
        self
    }
}

#[derive(Debug)]
pub struct SceneRegistry<V> {
    initial: SceneId,
    scenes: HashMap<SceneId, SceneDescriptor<V>>,
}

impl<V> SceneRegistry<V> {
    pub fn builder(initial: impl Into<SceneId>) -> SceneRegistryBuilder<V> {
        SceneRegistryBuilder {
            initial: initial.into(),
            scenes: Vec::new(),
        }
    }

    #[inline]
    pub fn initial(&self) -> &SceneId {
        &self.initial
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&SceneDescriptor<V>> {
        self.scenes.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SceneId> {
        self.scenes.keys()
    }

    /// Replace a scene's rule with a host branch function.
    pub fn set_branch(&mut self, id: &str, f: BranchFn) -> Result<(), SceneError> {
        let desc = self
            .scenes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownScene { id: id.to_string() })?;
        desc.next = NextRule::Dynamic(f);
        Ok(())
    }

    /// `(from, to)` pairs whose static target is missing from the registry.
    /// Such transitions render the end-of-content view.
    pub fn dangling_targets(&self) -> Vec<(SceneId, SceneId)> {
        let mut out: Vec<(SceneId, SceneId)> = self
            .scenes
            .iter()
            .flat_map(|(from, desc)| {
                desc.next
                    .static_targets()
                    .into_iter()
                    .filter(|to| !self.scenes.contains_key(to.as_str()))
                    .map(move |to| (from.clone(), to.clone()))
            })
            .collect();
        out.sort();
        out
    }
}

pub struct SceneRegistryBuilder<V> {
    initial: SceneId,
    scenes: Vec<(SceneId, SceneDescriptor<V>)>,
}

impl<V> SceneRegistryBuilder<V> {
    pub fn scene(mut self, id: impl Into<SceneId>, desc: SceneDescriptor<V>) -> Self {
        self.scenes.push((id.into(), desc));
        self
    }

    pub fn build(self) -> Result<SceneRegistry<V>, SceneError> {
        let mut scenes = HashMap::with_capacity(self.scenes.len());
        for (id, desc) in self.scenes {
            if id.as_str().is_empty() {
                return Err(SceneError::EmptyId);
            }
            scenes.insert(id, desc);
        }
        if !scenes.contains_key(self.initial.as_str()) {
            return Err(SceneError::MissingInitial {
                id: self.initial.to_string(),
            });
        }
        let registry = SceneRegistry {
            initial: self.initial,
            scenes,
        };
        for (from, to) in registry.dangling_targets() {
            log::warn!("scene '{from}' transitions to unknown scene '{to}'");
        }
        Ok(registry)
    }
}

fn default_initial() -> SceneId {
    SceneId::from(DEFAULT_INITIAL_SCENE)
}

/// JSON form of a registry. Views are named by string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryDoc {
    #[serde(default = "default_initial")]
    pub initial_scene: SceneId,
    pub scenes: IndexMap<SceneId, SceneDoc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDoc {
    pub view: String,
    #[serde(default)]
    pub next: Option<NextDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<JsonValue>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextDoc {
    Fixed(SceneId),
    Branch {
        #[serde(default)]
        cases: IndexMap<String, SceneId>,
        fallback: SceneId,
    },
}

impl From<NextDoc> for NextRule {
    fn from(doc: NextDoc) -> Self {
        match doc {
            NextDoc::Fixed(id) => NextRule::Fixed(id),
            NextDoc::Branch { cases, fallback } => NextRule::Branch { cases, fallback },
        }
    }
}

impl SceneRegistry<String> {
    pub fn from_doc(doc: RegistryDoc) -> Result<Self, SceneError> {
        doc.scenes
            .into_iter()
            .fold(SceneRegistry::builder(doc.initial_scene), |b, (id, scene)| {
                let next = scene.next.map(NextRule::from).unwrap_or(NextRule::End);
                b.scene(
                    id,
                    SceneDescriptor {
                        view: scene.view,
                        next,
                        props: scene.props,
                    },
                )
            })
            .build()
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let doc: RegistryDoc = serde_json::from_str(json)?;
        Self::from_doc(doc)
    }
}
