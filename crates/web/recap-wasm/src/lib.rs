//! Recap wasm bindings
//!
//! Browser adapters for the host-agnostic cores: [`RecapScenes`] keeps the
//! scene navigator in sync with `location.hash` and the History API, and
//! [`RecapMarquee`] runs the marquee on a `requestAnimationFrame` loop and
//! writes per-glyph styles.

use serde::Serialize;
use wasm_bindgen::prelude::*;

mod fragment;
mod gesture;
mod marquee;
mod scene;

pub use fragment::BrowserFragment;
pub use marquee::RecapMarquee;
pub use scene::RecapScenes;

pub(crate) fn is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize as plain JS objects (not `Map`s) so hosts can read fields directly.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("serialize error: {e}")))
}

/// Install the panic hook and route `log` records to the browser console.
/// `level` is one of `error|warn|info|debug|trace` (default `info`).
/// Calling it more than once is harmless.
#[wasm_bindgen]
pub fn init(level: Option<String>) {
    #[cfg(feature = "console_error")]
    console_error_panic_hook::set_once();

    let level = level
        .as_deref()
        .and_then(|l| l.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

/// ABI guard for the JS wrapper.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
