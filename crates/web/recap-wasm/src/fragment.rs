//! History API backed [`FragmentStore`].

use recap_scene_core::{FragmentStore, HistoryMode, SceneId};
use wasm_bindgen::JsValue;

/// Reads `location.hash`, writes through `history.pushState` / `replaceState`.
/// State writes do not fire `hashchange`, so programmatic navigation never
/// loops back into the navigator. Without a window every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserFragment;

impl FragmentStore for BrowserFragment {
    fn read(&self) -> Option<String> {
        let raw = web_sys::window()?.location().hash().ok()?;
        // `location.hash` is percent-encoded; ids are compared decoded.
        let hash = js_sys::decode_uri_component(&raw)
            .map(String::from)
            .unwrap_or(raw);
        SceneId::from_fragment(&hash).map(|id| id.as_str().to_string())
    }

    fn write(&mut self, id: &SceneId, mode: HistoryMode) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let url = id.to_fragment();
        let res = match mode {
            HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&url)),
            HistoryMode::Replace => {
                history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
            }
        };
        if let Err(e) = res {
            log::warn!("failed to write fragment {url}: {e:?}");
        }
    }
}
