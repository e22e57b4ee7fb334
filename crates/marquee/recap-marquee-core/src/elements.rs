//! Tracked glyphs and the per-frame visibility/placement pass.
//!
//! The arena is built once per content mount and only `last_visible` is ever
//! written afterwards. Hidden glyphs that stay hidden cost one comparison.

use serde::{Deserialize, Serialize};

use crate::config::MarqueeConfig;
use crate::outputs::{ChangeKind, FrameOutputs};
use crate::path::CurvePath;
use crate::phase::wrap_percent;

/// One line of text laid along the path, offset in phase space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphRow {
    pub text: String,
    pub base_offset: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedElement {
    pub row_base_offset: f64,
    pub char_index: u32,
    /// Starts true so the first frame hides every glyph outside the window.
    pub last_visible: bool,
}

impl TrackedElement {
    pub fn new(row_base_offset: f64, char_index: u32) -> Self {
        Self {
            row_base_offset,
            char_index,
            last_visible: true,
        }
    }

    /// One element per `char`, rows in order.
    pub fn for_rows(rows: &[GlyphRow]) -> Vec<Self> {
        rows.iter()
            .flat_map(|row| {
                row.text
                    .chars()
                    .enumerate()
                    .map(move |(i, _)| TrackedElement::new(row.base_offset, i as u32))
            })
            .collect()
    }

    /// Wrapped distance along the path for the given global progress.
    #[inline]
    pub fn distance(&self, progress: f64, char_spacing: f64) -> f64 {
        wrap_percent(self.row_base_offset + progress + f64::from(self.char_index) * char_spacing)
    }
}

/// Resolve visibility and placement for every element at `progress`.
pub fn resolve_elements(
    elements: &mut [TrackedElement],
    progress: f64,
    cfg: &MarqueeConfig,
    path: Option<&CurvePath>,
    out: &mut FrameOutputs,
) {
    for (i, el) in elements.iter_mut().enumerate() {
        let index = i as u32;
        let distance = el.distance(progress, cfg.char_spacing);
        if !cfg.window.contains(distance) {
            if el.last_visible {
                el.last_visible = false;
                out.push_change(index, ChangeKind::Hide);
            }
            continue;
        }
        if !el.last_visible {
            el.last_visible = true;
            out.push_change(index, ChangeKind::Show);
        }
        out.push_change(
            index,
            ChangeKind::Place {
                distance,
                point: path.map(|p| p.point_at(distance)),
            },
        );
    }
}
