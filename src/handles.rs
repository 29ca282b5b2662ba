//! Draggable edge handles for resizing committed bands.
//!
//! Handle positions are never cached: the render synchronizer re-derives
//! them from the store through the effective pair on every pass, so they
//! stay correct through concurrent zoom changes. The editor here only
//! tracks which handle (if any) the pointer is currently dragging and
//! routes drag positions into the store's clamped edge update.

use egui::Pos2;

use crate::data::annotations::{AnnotationId, AnnotationStore, BandEdge};
use crate::data::scale::ScalePair;
use crate::render::HandleMarker;

/// Pixel tolerance for grabbing a handle.
pub const HANDLE_GRAB_TOLERANCE: f32 = 6.0;

/// A handle the pointer pressed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub id: AnnotationId,
    pub edge: BandEdge,
}

/// Find the handle under the pointer, nearest first when several overlap.
pub fn hit_test(handles: &[HandleMarker], pos: Pos2) -> Option<HandleHit> {
    let mut best: Option<(f32, HandleHit)> = None;
    for h in handles {
        let dx = (pos.x - h.x).abs();
        if dx > HANDLE_GRAB_TOLERANCE || pos.y < h.top || pos.y > h.bottom {
            continue;
        }
        if best.map(|(d, _)| dx < d).unwrap_or(true) {
            best = Some((
                dx,
                HandleHit {
                    id: h.id,
                    edge: h.edge,
                },
            ));
        }
    }
    best.map(|(_, hit)| hit)
}

/// Tracks the active handle drag, if any.
#[derive(Debug, Default)]
pub struct HandleEditor {
    drag: Option<HandleHit>,
}

impl HandleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn active(&self) -> Option<HandleHit> {
        self.drag
    }

    pub fn begin_drag(&mut self, hit: HandleHit) {
        self.drag = Some(hit);
    }

    /// Advance the drag: invert the pointer x through the pair current at
    /// drag time and let the store clamp against the opposite edge.
    ///
    /// Returns the edge value actually applied.
    pub fn drag_to(
        &self,
        screen_x: f32,
        eff: &ScalePair,
        store: &mut AnnotationStore,
    ) -> Option<f64> {
        let hit = self.drag?;
        let data_x = eff.x.invert(f64::from(screen_x));
        store.update_band_edge(hit.id, hit.edge, data_x)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}
