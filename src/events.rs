//! Event channel for chart interactions.
//!
//! Callers can subscribe to chart events through an [`EventHub`]. Each event
//! carries a set of [`EventKind`] flags so one occurrence can match several
//! categories; subscribers pass an [`EventFilter`] OR-mask and receive only
//! the events whose kinds intersect it.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::annotations::{Annotation, AnnotationId};
use crate::mode::InteractionMode;

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// The interaction mode changed (draw key pressed or released).
    pub const MODE_CHANGED: Self = Self(1 << 0);
    /// A draw session committed a new annotation.
    pub const ANNOTATION_ADDED: Self = Self(1 << 1);
    /// A band edge was moved by a handle drag.
    pub const BAND_RESIZED: Self = Self(1 << 2);
    /// A draw session was cancelled without committing.
    pub const SESSION_CANCELLED: Self = Self(1 << 3);
    /// The view was zoomed.
    pub const ZOOM: Self = Self(1 << 4);
    /// The view was panned.
    pub const PAN: Self = Self(1 << 5);
    /// The chart surface was resized.
    pub const RESIZE: Self = Self(1 << 6);
    /// A screenshot was requested.
    pub const SCREENSHOT: Self = Self(1 << 7);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }
        let pairs: &[(EventKind, &str)] = &[
            (EventKind::MODE_CHANGED, "MODE_CHANGED"),
            (EventKind::ANNOTATION_ADDED, "ANNOTATION_ADDED"),
            (EventKind::BAND_RESIZED, "BAND_RESIZED"),
            (EventKind::SESSION_CANCELLED, "SESSION_CANCELLED"),
            (EventKind::ZOOM, "ZOOM"),
            (EventKind::PAN, "PAN"),
            (EventKind::RESIZE, "RESIZE"),
            (EventKind::SCREENSHOT, "SCREENSHOT"),
        ];
        let mut names = Vec::new();
        let mut known: u32 = 0;
        for (kind, name) in pairs {
            known |= kind.0;
            if self.contains(*kind) {
                names.push(*name);
            }
        }
        if self.0 & !known != 0 {
            return write!(f, "0x{:x}", self.0);
        }
        write!(f, "{}", names.join("|"))
    }
}

/// Metadata for annotation events.
#[derive(Debug, Clone)]
pub struct AnnotationMeta {
    pub id: AnnotationId,
    /// Shape value at the time of the event (data-space).
    pub shape: Annotation,
}

/// Metadata for zoom/pan events.
#[derive(Debug, Clone, Copy)]
pub struct ViewMeta {
    pub k: f64,
    pub tx: f64,
    pub ty: f64,
}

/// Metadata for resize events.
#[derive(Debug, Clone, Copy)]
pub struct ResizeMeta {
    pub width: f32,
    pub height: f32,
}

/// An event emitted by the chart.
#[derive(Debug, Clone)]
pub struct ChartEvent {
    pub kinds: EventKind,
    /// Seconds since the hub was created; set on emit.
    pub timestamp: f64,
    pub mode: Option<InteractionMode>,
    pub annotation: Option<AnnotationMeta>,
    pub view: Option<ViewMeta>,
    pub resize: Option<ResizeMeta>,
}

impl ChartEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            mode: None,
            annotation: None,
            view: None,
            resize: None,
        }
    }
}

/// OR-mask filter selecting which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &ChartEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

struct Subscriber {
    filter: EventFilter,
    sender: Sender<ChartEvent>,
}

struct HubInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

/// Collects and distributes chart events to subscribers.
///
/// Attach a clone to [`ChartConfig`](crate::config::ChartConfig) before
/// launching the chart, then subscribe with an optional filter to receive
/// events on an `mpsc` channel. Dead subscribers are pruned on emit.
#[derive(Clone)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<ChartEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to all events, unfiltered.
    pub fn subscribe_all(&self) -> Receiver<ChartEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to every subscriber whose filter matches.
    pub fn emit(&self, mut event: ChartEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
