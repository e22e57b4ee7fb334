use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::Array;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use recap_marquee_core::{
    CapabilityProbe, ChangeKind, FrameOutputs, GlyphRow, MarqueeConfig, MarqueeEngine, Swipe,
    TrackedElement, ViewportGate,
};

use crate::gesture::{self, GestureSource};
use crate::{is_undefined_or_null, to_js};

pub(crate) struct MarqueeInner {
    pub(crate) engine: MarqueeEngine,
    handles: Vec<HtmlElement>,
    frame: Option<AnimationFrame>,
}

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(e) = el.style().set_property(prop, value) {
        log::warn!("failed to set {prop}: {e:?}");
    }
}

fn apply_outputs(handles: &[HtmlElement], out: &FrameOutputs) {
    for change in &out.changes {
        let Some(el) = handles.get(change.index as usize) else {
            continue;
        };
        match &change.kind {
            ChangeKind::Show => set_style(el, "visibility", "visible"),
            ChangeKind::Hide => set_style(el, "visibility", "hidden"),
            ChangeKind::Place { distance, .. } => {
                set_style(el, "offset-distance", &format!("{distance:.3}%"))
            }
        }
    }
}

fn apply_path(inner: &MarqueeInner) {
    let Some(path) = inner.engine.path() else {
        return;
    };
    let value = format!("path('{}')", path.svg_d());
    for el in &inner.handles {
        set_style(el, "offset-path", &value);
    }
}

fn schedule(rc: &Rc<RefCell<MarqueeInner>>) {
    let weak = Rc::downgrade(rc);
    let handle = request_animation_frame(move |ts| on_frame(&weak, ts));
    rc.borrow_mut().frame = Some(handle);
}

fn on_frame(weak: &Weak<RefCell<MarqueeInner>>, ts: f64) {
    let Some(rc) = weak.upgrade() else {
        return;
    };
    let again = {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        inner.frame = None;
        let out = inner.engine.frame(ts);
        apply_outputs(&inner.handles, out);
        inner.engine.wants_frame()
    };
    if again {
        schedule(&rc);
    }
}

/// Start the frame loop if the engine wants frames and none is pending;
/// cancel a pending frame if it does not.
fn sync_loop(rc: &Rc<RefCell<MarqueeInner>>) {
    let (wants, pending) = {
        let inner = rc.borrow();
        (inner.engine.wants_frame(), inner.frame.is_some())
    };
    if wants && !pending {
        schedule(rc);
    } else if !wants && pending {
        rc.borrow_mut().frame = None;
    }
}

/// Browser host for the curved marquee. The host hands over one element per
/// glyph in mount order; this binding drives a `requestAnimationFrame` loop
/// while the marquee is mounted and in view, and writes `visibility`,
/// `offset-path` and `offset-distance` on those elements.
#[wasm_bindgen]
pub struct RecapMarquee {
    inner: Rc<RefCell<MarqueeInner>>,
    gesture: Option<Rc<RefCell<GestureSource>>>,
    page_visibility: Option<EventListener>,
}

#[wasm_bindgen]
impl RecapMarquee {
    /// Pass a config object or undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RecapMarquee, JsError> {
        #[cfg(feature = "console_error")]
        console_error_panic_hook::set_once();

        let cfg: MarqueeConfig = if is_undefined_or_null(&config) {
            MarqueeConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config parse error: {e}")))?
        };
        let engine =
            MarqueeEngine::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(RecapMarquee {
            inner: Rc::new(RefCell::new(MarqueeInner {
                engine,
                handles: Vec::new(),
                frame: None,
            })),
            gesture: None,
            page_visibility: None,
        })
    }

    /// Mount glyph elements. `rows` is `[{ text, base_offset }]`; `elements`
    /// must hold exactly one element per character, row by row.
    pub fn mount(&mut self, elements: Array, rows: JsValue) -> Result<u32, JsError> {
        let rows: Vec<GlyphRow> =
            swb::from_value(rows).map_err(|e| JsError::new(&format!("rows parse error: {e}")))?;
        let handles = elements
            .iter()
            .map(|v| v.dyn_into::<HtmlElement>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| JsError::new("mount expects an array of HTMLElements"))?;
        let tracked = TrackedElement::for_rows(&rows);
        if tracked.len() != handles.len() {
            return Err(JsError::new(&format!(
                "mount: {} glyphs but {} elements",
                tracked.len(),
                handles.len()
            )));
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.engine.mount(tracked);
            inner.handles = handles;
            apply_path(&inner);
        }
        sync_loop(&self.inner);
        Ok(self.inner.borrow().handles.len() as u32)
    }

    /// Stop the loop, release element handles, and abandon gesture probing.
    pub fn unmount(&mut self) {
        self.gesture = None;
        self.page_visibility = None;
        let mut inner = self.inner.borrow_mut();
        inner.frame = None;
        inner.engine.unmount();
        inner.handles.clear();
    }

    /// Replace the viewport gate (intersection threshold, trigger-once).
    #[wasm_bindgen(js_name = setViewportGate)]
    pub fn set_viewport_gate(&mut self, threshold: f64, once: bool) {
        self.inner
            .borrow_mut()
            .engine
            .set_viewport_gate(ViewportGate::new(threshold, once));
    }

    /// Feed an `IntersectionObserver` ratio. Returns whether the loop runs.
    #[wasm_bindgen(js_name = setIntersection)]
    pub fn set_intersection(&mut self, ratio: f64) -> bool {
        let running = self.inner.borrow_mut().engine.observe_intersection(ratio);
        sync_loop(&self.inner);
        running
    }

    #[wasm_bindgen(js_name = setInView)]
    pub fn set_in_view(&mut self, in_view: bool) -> bool {
        let running = self.inner.borrow_mut().engine.set_in_view(in_view);
        sync_loop(&self.inner);
        running
    }

    #[wasm_bindgen(js_name = setPageHidden)]
    pub fn set_page_hidden(&mut self, hidden: bool) {
        self.inner.borrow_mut().engine.set_page_hidden(hidden);
    }

    /// Track `document.hidden` through `visibilitychange`.
    #[wasm_bindgen(js_name = watchPageVisibility)]
    pub fn watch_page_visibility(&mut self) -> Result<(), JsError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("watchPageVisibility requires a document"))?;
        self.inner
            .borrow_mut()
            .engine
            .set_page_hidden(document.hidden());
        let weak = Rc::downgrade(&self.inner);
        let doc = document.clone();
        self.page_visibility = Some(EventListener::new(
            &document,
            "visibilitychange",
            move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().engine.set_page_hidden(doc.hidden());
                }
            },
        ));
        Ok(())
    }

    /// Recompute the curve for a container of `width` x `height` pixels.
    /// Returns whether the path changed; invalid sizes keep the last path.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let mut inner = self.inner.borrow_mut();
        let changed = inner.engine.resize(width, height);
        if changed {
            apply_path(&inner);
        }
        changed
    }

    /// SVG path data for the current curve, if any.
    #[wasm_bindgen(js_name = pathData)]
    pub fn path_data(&self) -> Option<String> {
        self.inner.borrow().engine.path().map(|p| p.svg_d())
    }

    /// Apply a swipe by event name (`"swipeleft"` / `"swiperight"`, or
    /// `"left"` / `"right"`).
    pub fn swipe(&mut self, name: &str) -> Result<(), JsError> {
        let swipe = Swipe::from_event_name(name)
            .ok_or_else(|| JsError::new(&format!("unknown swipe: {name}")))?;
        self.inner.borrow_mut().engine.swipe(swipe);
        Ok(())
    }

    /// Listen for swipes on `target`, preferring `window.Hammer` once it
    /// loads and falling back to pointer events.
    #[wasm_bindgen(js_name = attachGestures)]
    pub fn attach_gestures(&mut self, target: HtmlElement) {
        let (probe, swipe_cfg) = {
            let inner = self.inner.borrow();
            let cfg = inner.engine.config();
            (CapabilityProbe::new(cfg.probe), cfg.swipe)
        };
        self.gesture = Some(gesture::attach(
            target,
            probe,
            swipe_cfg,
            Rc::downgrade(&self.inner),
        ));
    }

    #[wasm_bindgen(js_name = gesturesBound)]
    pub fn gestures_bound(&self) -> bool {
        self.gesture
            .as_ref()
            .map(|g| g.borrow().is_bound())
            .unwrap_or(false)
    }

    /// Step one frame manually at `now_ms` and return its outputs. For hosts
    /// that run their own loop; element styles are applied as usual.
    pub fn frame(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let out = inner.engine.frame(now_ms);
        apply_outputs(&inner.handles, out);
        to_js(out)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.borrow().frame.is_some()
    }

    pub fn progress(&self) -> f64 {
        self.inner.borrow().engine.progress()
    }

    pub fn velocity(&self) -> f64 {
        self.inner.borrow().engine.velocity()
    }
}
