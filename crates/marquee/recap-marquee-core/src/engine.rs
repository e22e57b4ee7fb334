//! MarqueeEngine: owns the phase, the glyph arena, the path, and the
//! activity flags; produces per-frame outputs.
//!
//! Methods:
//! - new, mount / mount_rows / unmount (arena lifecycle)
//! - swipe (gesture impulse), resize (path), set_in_view / set_page_hidden (activity)
//! - frame (phase update → visibility/placement pass)

use crate::activity::ViewportGate;
use crate::config::MarqueeConfig;
use crate::elements::{resolve_elements, GlyphRow, TrackedElement};
use crate::error::MarqueeError;
use crate::gesture::{Direction, Swipe};
use crate::outputs::FrameOutputs;
use crate::path::CurvePath;
use crate::phase::Phase;

#[derive(Debug)]
pub struct MarqueeEngine {
    cfg: MarqueeConfig,
    phase: Phase,
    elements: Vec<TrackedElement>,
    path: Option<CurvePath>,
    viewport: ViewportGate,
    mounted: bool,
    page_hidden: bool,
    outputs: FrameOutputs,
}

impl MarqueeEngine {
    pub fn new(cfg: MarqueeConfig) -> Result<Self, MarqueeError> {
        cfg.validate()?;
        Ok(Self {
            phase: Phase::new(&cfg),
            cfg,
            elements: Vec::new(),
            path: None,
            viewport: ViewportGate::default(),
            mounted: false,
            page_hidden: false,
            outputs: FrameOutputs::default(),
        })
    }

    /// Replace the arena wholesale. Indices in later outputs refer to `elements` order.
    pub fn mount(&mut self, elements: Vec<TrackedElement>) {
        self.elements = elements;
        self.outputs.changes.reserve(self.elements.len() * 2);
        self.mounted = true;
        self.phase.reset_clock();
        log::debug!("marquee mounted with {} element(s)", self.elements.len());
    }

    /// Mount one element per character of `rows`. Returns the element count.
    pub fn mount_rows(&mut self, rows: &[GlyphRow]) -> usize {
        self.mount(TrackedElement::for_rows(rows));
        self.elements.len()
    }

    /// Tear down the arena. Page visibility is forgotten; the next host
    /// reports it again after mounting.
    pub fn unmount(&mut self) {
        self.elements.clear();
        self.mounted = false;
        self.page_hidden = false;
        self.phase.reset_clock();
        self.outputs.clear();
    }

    /// Use a custom viewport gate (threshold / trigger-once).
    pub fn set_viewport_gate(&mut self, gate: ViewportGate) {
        self.viewport = gate;
    }

    /// Feed an intersection ratio. Returns [`wants_frame`](Self::wants_frame).
    pub fn observe_intersection(&mut self, ratio: f64) -> bool {
        let was = self.viewport.in_view();
        let now = self.viewport.observe(ratio);
        if was && !now {
            log::debug!("marquee left view; frames paused");
            self.phase.reset_clock();
        }
        self.wants_frame()
    }

    /// Convenience for hosts that already have a boolean signal.
    pub fn set_in_view(&mut self, in_view: bool) -> bool {
        self.observe_intersection(if in_view { 1.0 } else { 0.0 })
    }

    /// While hidden, frames keep arriving but do nothing.
    pub fn set_page_hidden(&mut self, hidden: bool) {
        self.page_hidden = hidden;
        if hidden {
            log::debug!("page hidden; frames skipped");
            self.phase.reset_clock();
        }
    }

    /// Recompute the path for a new container size. Invalid sizes keep the
    /// last known path. Returns whether the path changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        match CurvePath::compute(width, height, &self.cfg.path) {
            Ok(path) => {
                let changed = self.path != Some(path);
                self.path = Some(path);
                changed
            }
            Err(e) => {
                log::warn!("keeping last marquee path: {e}");
                false
            }
        }
    }

    pub fn swipe(&mut self, swipe: Swipe) {
        self.phase.apply_swipe(swipe, &self.cfg);
    }

    /// Whether the host should keep scheduling animation frames.
    #[inline]
    pub fn wants_frame(&self) -> bool {
        self.mounted && self.viewport.in_view()
    }

    /// Run one animation frame stamped `now_ms` (host clock, milliseconds).
    pub fn frame(&mut self, now_ms: f64) -> &FrameOutputs {
        self.outputs.clear();
        if !self.wants_frame() || self.page_hidden {
            self.phase.reset_clock();
        } else {
            self.outputs.moved = self.phase.tick(now_ms, &self.cfg);
            resolve_elements(
                &mut self.elements,
                self.phase.progress,
                &self.cfg,
                self.path.as_ref(),
                &mut self.outputs,
            );
        }
        self.outputs.progress = self.phase.progress;
        self.outputs.velocity = self.phase.velocity;
        &self.outputs
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.phase.progress
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.phase.velocity
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.phase.direction
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn path(&self) -> Option<&CurvePath> {
        self.path.as_ref()
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.cfg
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_page_hidden(&self) -> bool {
        self.page_hidden
    }
}
