use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use recap_scene_core::{
    BranchFn, RegistryDoc, SceneConfig, SceneId, SceneNavigator, SceneRegistry, SceneView,
    TransitionSpec,
};

use crate::fragment::BrowserFragment;
use crate::{is_undefined_or_null, to_js};

type Navigator = SceneNavigator<String, BrowserFragment>;

/// What the host should mount, as handed to JS.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RenderDto<'a> {
    Scene {
        id: &'a str,
        view: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        props: Option<&'a JsonValue>,
        mount_key: u64,
        transition: &'a TransitionSpec,
    },
    EndOfContent {
        id: &'a str,
    },
}

/// Wraps a host branch function `(choice?: string) => string` for scene `id`.
/// A throw or a non-string result resolves to `id` itself; the navigator
/// treats that as "no change".
fn js_branch(id: String, f: Function) -> BranchFn {
    Box::new(move |choice: Option<&str>| {
        let arg = choice.map(JsValue::from_str).unwrap_or(JsValue::UNDEFINED);
        match f.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) => match val.as_string() {
                Some(s) => SceneId::from(s),
                None => {
                    log::warn!("branch function for {id} returned a non-string target");
                    SceneId::from(id.as_str())
                }
            },
            Err(e) => {
                log::warn!("branch function for {id} threw: {e:?}");
                SceneId::from(id.as_str())
            }
        }
    })
}

#[wasm_bindgen]
pub struct RecapScenes {
    nav: Rc<RefCell<Navigator>>,
    hash_listener: Option<EventListener>,
}

#[wasm_bindgen]
impl RecapScenes {
    /// Build the navigator from a registry document, an optional config
    /// object and an optional `{ sceneId: (choice) => targetId }` map of
    /// host branch functions.
    ///
    ///   new RecapScenes({ initial_scene: "loading", scenes: {...} }, null, { pickTrack: fn })
    #[wasm_bindgen(constructor)]
    pub fn new(
        registry: JsValue,
        config: JsValue,
        branches: JsValue,
    ) -> Result<RecapScenes, JsError> {
        #[cfg(feature = "console_error")]
        console_error_panic_hook::set_once();

        let doc: RegistryDoc = swb::from_value(registry)
            .map_err(|e| JsError::new(&format!("registry parse error: {e}")))?;
        let cfg: SceneConfig = if is_undefined_or_null(&config) {
            SceneConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config parse error: {e}")))?
        };
        let mut reg = SceneRegistry::from_doc(doc)
            .map_err(|e| JsError::new(&format!("registry error: {e}")))?;

        if !is_undefined_or_null(&branches) {
            let obj: Object = branches
                .dyn_into()
                .map_err(|_| JsError::new("branches must be an object of functions"))?;
            for key in Object::keys(&obj).iter() {
                let Some(id) = key.as_string() else { continue };
                let f: Function = Reflect::get(&obj, &key)
                    .ok()
                    .and_then(|v| v.dyn_into().ok())
                    .ok_or_else(|| JsError::new(&format!("branch for {id} is not a function")))?;
                reg.set_branch(&id, js_branch(id.clone(), f))
                    .map_err(|e| JsError::new(&format!("branch error: {e}")))?;
            }
        }

        Ok(RecapScenes {
            nav: Rc::new(RefCell::new(SceneNavigator::new(reg, BrowserFragment, cfg))),
            hash_listener: None,
        })
    }

    /// Resolve the starting scene from `location.hash`; returns its id.
    pub fn initialize(&mut self) -> String {
        self.nav.borrow_mut().initialize().to_string()
    }

    /// Advance from the current scene. Returns the change or `null`.
    pub fn navigate(&mut self, choice: Option<String>) -> Result<JsValue, JsError> {
        let change = self.nav.borrow_mut().navigate(choice.as_deref());
        match change {
            Some(c) => to_js(&c),
            None => Ok(JsValue::NULL),
        }
    }

    /// Re-read `location.hash` (back/forward, manual edit). Returns the change or `null`.
    #[wasm_bindgen(js_name = syncFromLocation)]
    pub fn sync_from_location(&mut self) -> Result<JsValue, JsError> {
        let change = self.nav.borrow_mut().on_external_fragment_change();
        match change {
            Some(c) => to_js(&c),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn current(&self) -> String {
        self.nav.borrow().current().to_string()
    }

    #[wasm_bindgen(js_name = isEndOfContent)]
    pub fn is_end_of_content(&self) -> bool {
        self.nav.borrow().is_end_of_content()
    }

    /// `{ kind: "scene", id, view, props?, mount_key, transition }` or
    /// `{ kind: "end_of_content", id }`.
    pub fn render(&self) -> Result<JsValue, JsError> {
        let nav = self.nav.borrow();
        let dto = match nav.render() {
            SceneView::Scene {
                id,
                view,
                props,
                mount_key,
                transition,
            } => RenderDto::Scene {
                id: id.as_str(),
                view: view.as_str(),
                props,
                mount_key,
                transition,
            },
            SceneView::EndOfContent { id } => RenderDto::EndOfContent { id: id.as_str() },
        };
        to_js(&dto)
    }

    /// Subscribe to `hashchange`. `on_change(change)` fires for every
    /// external change that moved the navigator. Replaces any prior listener.
    pub fn listen(&mut self, on_change: Option<Function>) -> Result<(), JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("listen requires a window"))?;
        let nav = Rc::clone(&self.nav);
        self.hash_listener = Some(EventListener::new(&window, "hashchange", move |_| {
            let change = nav.borrow_mut().on_external_fragment_change();
            let (Some(change), Some(cb)) = (change, on_change.as_ref()) else {
                return;
            };
            let Ok(v) = to_js(&change) else {
                log::warn!("failed to serialize scene change to {}", change.to);
                return;
            };
            if let Err(e) = cb.call1(&JsValue::UNDEFINED, &v) {
                log::warn!("scene change callback threw: {e:?}");
            }
        }));
        Ok(())
    }

    /// Drop the `hashchange` subscription.
    pub fn unlisten(&mut self) {
        self.hash_listener = None;
    }
}
