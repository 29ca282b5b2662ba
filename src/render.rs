//! The render synchronizer: projects every persisted and transient element
//! through the current effective scale pair into screen-space geometry.
//!
//! [`build_scene`] is the single entry point, invoked whenever the viewport,
//! the effective pair, the annotation store, or the live preview changes.
//! It reads data-space coordinates but never writes them; annotations keep
//! their stored values and are projected fresh on every pass, which is what
//! keeps them locked to the data through arbitrary pan/zoom sequences.

use egui::{Pos2, Rect, pos2};

use crate::data::annotations::{Annotation, AnnotationId, AnnotationStore, BandEdge};
use crate::data::look::ShapeLook;
use crate::data::scale::{LinearScale, Margins, ScalePair, Viewport};
use crate::session::{DrawKind, PreviewShape};

/// One axis tick: screen coordinate along the axis plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub screen: f32,
    pub label: String,
}

/// Screen-space geometry of one annotation or preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenShape {
    Segment { a: Pos2, b: Pos2 },
    Band { rect: Rect },
}

/// A projected annotation, carrying its identity and look for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneShape {
    pub id: AnnotationId,
    pub shape: ScreenShape,
    pub look: ShapeLook,
}

/// Screen position of one band edge handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub id: AnnotationId,
    pub edge: BandEdge,
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

/// The authoritative screen geometry for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Plot area inside the margins.
    pub plot_rect: Rect,
    /// Series path vertices.
    pub series: Vec<Pos2>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Every persisted annotation, projected.
    pub shapes: Vec<SceneShape>,
    /// Edge handles for every band.
    pub handles: Vec<HandleMarker>,
    /// The transient preview, if a draw session is live.
    pub preview: Option<ScreenShape>,
}

fn plot_rect(viewport: Viewport, margins: Margins) -> Rect {
    Rect::from_min_max(
        pos2(margins.left, margins.top),
        pos2(
            viewport.width - margins.right,
            viewport.height - margins.bottom,
        ),
    )
}

fn project(eff: &ScalePair, p: [f64; 2]) -> Pos2 {
    pos2(eff.x.apply(p[0]) as f32, eff.y.apply(p[1]) as f32)
}

fn band_rect(eff: &ScalePair, x_start: f64, x_end: f64, plot: Rect) -> Rect {
    let x0 = eff.x.apply(x_start) as f32;
    let x1 = eff.x.apply(x_end) as f32;
    Rect::from_min_max(
        pos2(x0.min(x1), plot.top()),
        pos2(x0.max(x1), plot.bottom()),
    )
}

/// Project the edge handles of every band in the store.
///
/// Exposed separately so pointer hit-testing can run against the same
/// geometry the scene will paint.
pub fn band_handles(
    store: &AnnotationStore,
    eff: &ScalePair,
    viewport: Viewport,
    margins: Margins,
) -> Vec<HandleMarker> {
    let plot = plot_rect(viewport, margins);
    let mut out = Vec::new();
    for item in store.iter() {
        if let Annotation::Band { x_start, x_end } = item.shape {
            for (edge, x) in [(BandEdge::Left, x_start), (BandEdge::Right, x_end)] {
                out.push(HandleMarker {
                    id: item.id,
                    edge,
                    x: eff.x.apply(x) as f32,
                    top: plot.top(),
                    bottom: plot.bottom(),
                });
            }
        }
    }
    out
}

/// Build the scene for one frame.
///
/// Returns `None` while the layout has not settled (zero viewport); an
/// empty annotation store yields a chart-only scene.
pub fn build_scene(
    series: &[f64],
    store: &AnnotationStore,
    preview: Option<&PreviewShape>,
    eff: &ScalePair,
    viewport: Viewport,
    margins: Margins,
) -> Option<Scene> {
    if !viewport.is_ready() {
        return None;
    }
    let plot = plot_rect(viewport, margins);

    let series_path = series
        .iter()
        .enumerate()
        .map(|(i, v)| project(eff, [i as f64, *v]))
        .collect();

    let x_ticks = ticks(&eff.x, plot.left(), plot.right(), 8);
    let y_ticks = ticks(&eff.y, plot.bottom(), plot.top(), 6);

    let shapes = store
        .iter()
        .map(|item| {
            let shape = match item.shape {
                Annotation::Segment { start, end } => ScreenShape::Segment {
                    a: project(eff, start),
                    b: project(eff, end),
                },
                Annotation::Band { x_start, x_end } => ScreenShape::Band {
                    rect: band_rect(eff, x_start, x_end, plot),
                },
            };
            SceneShape {
                id: item.id,
                shape,
                look: item.look,
            }
        })
        .collect();

    let handles = band_handles(store, eff, viewport, margins);

    let preview = preview.map(|p| match p.kind {
        DrawKind::Segment => ScreenShape::Segment {
            a: project(eff, p.start),
            b: p.end_screen,
        },
        DrawKind::Band => {
            let x0 = eff.x.apply(p.start[0]) as f32;
            let x1 = p.end_screen.x;
            ScreenShape::Band {
                rect: Rect::from_min_max(
                    pos2(x0.min(x1), plot.top()),
                    pos2(x0.max(x1), plot.bottom()),
                ),
            }
        }
    });

    Some(Scene {
        plot_rect: plot,
        series: series_path,
        x_ticks,
        y_ticks,
        shapes,
        handles,
        preview,
    })
}

/// Generate ticks for the visible data window of one scale.
///
/// `pixel_lo`/`pixel_hi` bound the plot area along this axis in screen
/// coordinates; the visible window is their inversion through the scale.
/// Steps follow a 1/2/5 progression.
pub fn ticks(scale: &LinearScale, pixel_lo: f32, pixel_hi: f32, target: usize) -> Vec<Tick> {
    let v0 = scale.invert(f64::from(pixel_lo));
    let v1 = scale.invert(f64::from(pixel_hi));
    let (lo, hi) = (v0.min(v1), v0.max(v1));
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let step = nice_step(span, target);
    let mut out = Vec::new();
    let mut v = (lo / step).ceil() * step;
    while v <= hi + step * 1e-6 {
        // Snap near-zero values that are artifacts of the ceil/multiply.
        let value = if v.abs() < step * 1e-6 { 0.0 } else { v };
        out.push(Tick {
            screen: scale.apply(value) as f32,
            label: format_tick(value, step),
        });
        v += step;
    }
    out
}

fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let factor = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * mag
}

fn format_tick(v: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", v)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{:.*}", decimals, v)
    }
}
