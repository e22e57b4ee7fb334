//! Recap Marquee Core (host-agnostic)
//!
//! Drives the curved headline marquee: one global phase in [0, 100) advanced
//! every animation frame by auto-drift or by decaying swipe velocity, and a
//! fixed arena of glyphs whose visibility and placement are pure functions of
//! that phase. Hosts feed timestamps, swipes, resizes and visibility signals,
//! and apply the returned per-element changes to their own handles.

pub mod activity;
pub mod capability;
pub mod config;
pub mod elements;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod outputs;
pub mod path;
pub mod phase;

// Re-exports for consumers (adapters)
pub use activity::ViewportGate;
pub use capability::{CapabilityProbe, ProbeState, ProbeStep};
pub use config::{MarqueeConfig, PathConfig, ProbeConfig, SwipeConfig, VisibleWindow};
pub use elements::{resolve_elements, GlyphRow, TrackedElement};
pub use engine::MarqueeEngine;
pub use error::MarqueeError;
pub use gesture::{Direction, PointerSample, Swipe, SwipeDetector};
pub use outputs::{ChangeKind, ElementChange, FrameOutputs};
pub use path::{CurvePath, PathPoint, Point};
pub use phase::{wrap_percent, Phase, PHASE_SPAN};
