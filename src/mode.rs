//! Exclusive interaction mode, driven by modifier-key edges.
//!
//! Exactly one mode is active at any time. `Navigate` is the initial and
//! terminal state; a draw mode is held only as long as its trigger key is.
//! The two triggers are mutually exclusive: pressing one while the other is
//! already held is ignored rather than overriding the active mode
//! (first-held-wins), and releasing the active trigger always returns to
//! `Navigate`.

/// The single currently active interaction behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pan/zoom gestures are live; annotations can be hovered and resized.
    #[default]
    Navigate,
    /// Pointer gestures draw a line segment; pan/zoom is suppressed.
    DrawSegment,
    /// Pointer gestures draw a horizontal band; pan/zoom is suppressed.
    DrawBand,
}

impl InteractionMode {
    pub fn is_drawing(&self) -> bool {
        !matches!(self, InteractionMode::Navigate)
    }
}

/// Which draw trigger a key edge refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTrigger {
    Segment,
    Band,
}

impl DrawTrigger {
    fn mode(self) -> InteractionMode {
        match self {
            DrawTrigger::Segment => InteractionMode::DrawSegment,
            DrawTrigger::Band => InteractionMode::DrawBand,
        }
    }
}

/// Outcome of feeding one key edge to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Mode unchanged (edge ignored).
    None,
    /// Entered the given draw mode; pan/zoom must be disabled.
    Entered(InteractionMode),
    /// Returned to `Navigate`; any in-progress draw session must be
    /// cancelled and pan/zoom re-enabled.
    Exited,
}

/// Tracks the active mode across key edges.
#[derive(Debug, Default)]
pub struct ModeTracker {
    mode: InteractionMode,
}

impl ModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Key-down edge for a draw trigger.
    ///
    /// Only honored while navigating: the opposite trigger cannot take over
    /// an already-held draw mode.
    pub fn key_down(&mut self, trigger: DrawTrigger) -> ModeChange {
        if self.mode != InteractionMode::Navigate {
            return ModeChange::None;
        }
        self.mode = trigger.mode();
        ModeChange::Entered(self.mode)
    }

    /// Key-up edge for a draw trigger.
    ///
    /// Only the trigger that entered the current mode exits it; releasing
    /// the other key while a mode is held is a no-op.
    pub fn key_up(&mut self, trigger: DrawTrigger) -> ModeChange {
        if self.mode != trigger.mode() {
            return ModeChange::None;
        }
        self.mode = InteractionMode::Navigate;
        ModeChange::Exited
    }
}
