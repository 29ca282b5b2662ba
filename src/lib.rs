//! Plotmark crate root: re-exports and module wiring.
//!
//! This crate provides an interactive annotated line chart built on
//! egui/eframe: a numeric series rendered in a resizable surface where the
//! user can pan/zoom and draw annotations (line segments and resizable
//! horizontal bands) that stay locked to the data through any transform.
//!
//! The implementation is split into cohesive modules:
//! - `data`: model and transform types (scales, view transform, annotations,
//!   key bindings)
//! - `mode`: the exclusive interaction mode state machine
//! - `session`: the transient draw-gesture lifecycle
//! - `handles`: draggable band edge handles
//! - `render`: scene building (data-space → screen-space projection)
//! - `chart`: the egui widget wiring input into the engine
//! - `events`: subscriber channel for chart events
//! - `app`: standalone eframe wrapper and run helper
//! - `source`: one-shot series fetch (feature `fetch`)

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod events;
pub mod handles;
pub mod mode;
pub mod render;
pub mod session;

#[cfg(feature = "fetch")]
pub mod source;

// Public re-exports for a compact external API
pub use app::{run_chart, ChartApp};
pub use chart::ChartPanel;
pub use config::ChartConfig;
pub use data::annotations::{Annotation, AnnotationId, AnnotationStore, BandEdge};
pub use data::scale::{LinearScale, Margins, ScalePair, Viewport};
pub use data::view::{ScaleExtent, ViewTransform};
pub use events::{ChartEvent, EventFilter, EventHub, EventKind};
pub use mode::InteractionMode;
