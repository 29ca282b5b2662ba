//! Transient draw-gesture lifecycle: anchor point → live preview → commit.
//!
//! At most one session exists at a time. The anchor is inverted into data
//! space once, at pointer-down, through the effective pair current at that
//! instant. The live preview keeps its end point in screen space so pointer
//! moves never re-invert it; only the committed shape is data-space. The
//! single preview element is replaced (not accumulated) on every move.

use egui::Pos2;

use crate::data::annotations::{Annotation, AnnotationId, AnnotationStore};
use crate::data::scale::ScalePair;
use crate::mode::InteractionMode;

/// Kind of shape being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Segment,
    Band,
}

/// In-progress gesture state. The anchor is fixed at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSession {
    pub kind: DrawKind,
    pub start: [f64; 2],
}

/// The single live preview element for the active session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewShape {
    pub kind: DrawKind,
    /// Anchor in data space (projected fresh each render).
    pub start: [f64; 2],
    /// Current pointer position, kept in screen space for the preview only.
    pub end_screen: Pos2,
}

/// Owns the session lifecycle and the preview element.
#[derive(Debug, Default)]
pub struct DrawController {
    session: Option<DrawSession>,
    preview: Option<PreviewShape>,
}

impl DrawController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DrawSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewShape> {
        self.preview.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session if a draw mode is active and none is running.
    ///
    /// Returns `true` when a session was created.
    pub fn pointer_down(&mut self, mode: InteractionMode, pos: Pos2, eff: &ScalePair) -> bool {
        if self.session.is_some() {
            return false;
        }
        let kind = match mode {
            InteractionMode::DrawSegment => DrawKind::Segment,
            InteractionMode::DrawBand => DrawKind::Band,
            InteractionMode::Navigate => return false,
        };
        let start = [
            eff.x.invert(f64::from(pos.x)),
            eff.y.invert(f64::from(pos.y)),
        ];
        self.session = Some(DrawSession { kind, start });
        true
    }

    /// Replace the live preview with one ending at the current pointer.
    /// No-op without an active session.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if let Some(s) = &self.session {
            self.preview = Some(PreviewShape {
                kind: s.kind,
                start: s.start,
                end_screen: pos,
            });
        }
    }

    /// Finish the gesture: invert the end point, commit the shape, and
    /// destroy session and preview. Returns the committed id, or `None`
    /// when no session was active (pointer-up is then a no-op).
    ///
    /// Degenerate shapes (`start == end`) are committed as zero-extent
    /// annotations rather than rejected.
    pub fn pointer_up(
        &mut self,
        pos: Pos2,
        eff: &ScalePair,
        store: &mut AnnotationStore,
    ) -> Option<AnnotationId> {
        let s = self.session.take()?;
        self.preview = None;
        let end = [
            eff.x.invert(f64::from(pos.x)),
            eff.y.invert(f64::from(pos.y)),
        ];
        let shape = match s.kind {
            DrawKind::Segment => Annotation::Segment {
                start: s.start,
                end,
            },
            DrawKind::Band => Annotation::Band {
                x_start: s.start[0].min(end[0]),
                x_end: s.start[0].max(end[0]),
            },
        };
        Some(store.append(shape))
    }

    /// Abandon the gesture: discard session and preview, commit nothing.
    /// Used when the draw-mode key is released mid-drag.
    pub fn cancel(&mut self) {
        self.session = None;
        self.preview = None;
    }
}
