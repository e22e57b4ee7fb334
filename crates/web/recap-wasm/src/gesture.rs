//! Swipe input for the marquee.
//!
//! A gesture library exposed as `window.Hammer` may finish loading after the
//! marquee mounts, so it is polled on an interval. Once found, its
//! `swipeleft`/`swiperight` events drive the engine. If the probe runs out of
//! attempts, raw pointer events are classified by [`SwipeDetector`] instead.
//! Dropping a [`GestureSource`] cancels any pending poll and unbinds.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlElement, MouseEvent};

use recap_marquee_core::{
    CapabilityProbe, PointerSample, ProbeStep, Swipe, SwipeConfig, SwipeDetector,
};

use crate::marquee::MarqueeInner;

const HAMMER_GLOBAL: &str = "Hammer";
const HAMMER_EVENTS: &str = "swipeleft swiperight";

struct HammerBinding {
    manager: JsValue,
    _callback: Closure<dyn FnMut(JsValue)>,
}

impl Drop for HammerBinding {
    fn drop(&mut self) {
        if let Some(destroy) = Reflect::get(&self.manager, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
        {
            if let Err(e) = destroy.call0(&self.manager) {
                log::warn!("gesture library destroy failed: {e:?}");
            }
        }
    }
}

pub(crate) struct GestureSource {
    probe: CapabilityProbe,
    poll: Option<Interval>,
    hammer: Option<HammerBinding>,
    pointer: Vec<EventListener>,
}

impl GestureSource {
    pub(crate) fn is_bound(&self) -> bool {
        self.hammer.is_some() || !self.pointer.is_empty()
    }
}

impl Drop for GestureSource {
    fn drop(&mut self) {
        self.probe.cancel();
    }
}

fn find_hammer() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(HAMMER_GLOBAL))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn dispatch(sink: &Weak<RefCell<MarqueeInner>>, swipe: Swipe) {
    if let Some(inner) = sink.upgrade() {
        inner.borrow_mut().engine.swipe(swipe);
    }
}

fn bind_hammer(
    ctor: &Function,
    target: &HtmlElement,
    sink: Weak<RefCell<MarqueeInner>>,
) -> Result<HammerBinding, JsValue> {
    let manager = Reflect::construct(ctor, &Array::of1(target.as_ref()))?;
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |ev: JsValue| {
        let name = Reflect::get(&ev, &JsValue::from_str("type"))
            .ok()
            .and_then(|v| v.as_string());
        if let Some(swipe) = name.as_deref().and_then(Swipe::from_event_name) {
            dispatch(&sink, swipe);
        }
    });
    let on: Function = Reflect::get(&manager, &JsValue::from_str("on"))?.dyn_into()?;
    on.call2(&manager, &JsValue::from_str(HAMMER_EVENTS), callback.as_ref())?;
    Ok(HammerBinding {
        manager,
        _callback: callback,
    })
}

fn sample(ev: &Event) -> Option<PointerSample> {
    let m = ev.dyn_ref::<MouseEvent>()?;
    Some(PointerSample {
        x: m.client_x() as f64,
        y: m.client_y() as f64,
        t_ms: ev.time_stamp(),
    })
}

fn bind_pointer(
    target: &HtmlElement,
    cfg: SwipeConfig,
    sink: Weak<RefCell<MarqueeInner>>,
) -> Vec<EventListener> {
    let detector = Rc::new(RefCell::new(SwipeDetector::new(cfg)));

    let down = {
        let detector = Rc::clone(&detector);
        EventListener::new(target, "pointerdown", move |ev| {
            if let Some(s) = sample(ev) {
                detector.borrow_mut().pointer_down(s);
            }
        })
    };
    let up = {
        let detector = Rc::clone(&detector);
        EventListener::new(target, "pointerup", move |ev| {
            let swipe = sample(ev).and_then(|s| detector.borrow_mut().pointer_up(s));
            if let Some(swipe) = swipe {
                dispatch(&sink, swipe);
            }
        })
    };
    let cancel = EventListener::new(target, "pointercancel", move |_| {
        detector.borrow_mut().cancel();
    });
    vec![down, up, cancel]
}

/// Start probing for the gesture library on `target`.
pub(crate) fn attach(
    target: HtmlElement,
    probe: CapabilityProbe,
    swipe_cfg: SwipeConfig,
    sink: Weak<RefCell<MarqueeInner>>,
) -> Rc<RefCell<GestureSource>> {
    let interval_ms = probe.interval_ms();
    let source = Rc::new(RefCell::new(GestureSource {
        probe,
        poll: None,
        hammer: None,
        pointer: Vec::new(),
    }));

    let weak_source = Rc::downgrade(&source);
    let poll = Interval::new(interval_ms, move || {
        let Some(source) = weak_source.upgrade() else {
            return;
        };
        let mut src = source.borrow_mut();
        let finished = match src.probe.attempt(find_hammer) {
            ProbeStep::Acquired(ctor) => {
                match bind_hammer(&ctor, &target, sink.clone()) {
                    Ok(binding) => src.hammer = Some(binding),
                    Err(e) => {
                        log::warn!("gesture library failed to bind, using pointer events: {e:?}");
                        src.pointer = bind_pointer(&target, swipe_cfg, sink.clone());
                    }
                }
                true
            }
            ProbeStep::Exhausted => {
                src.pointer = bind_pointer(&target, swipe_cfg, sink.clone());
                true
            }
            ProbeStep::Retry => false,
            ProbeStep::Inactive => true,
        };
        let stale = if finished { src.poll.take() } else { None };
        drop(src);
        drop(stale);
    });
    source.borrow_mut().poll = Some(poll);
    source
}
