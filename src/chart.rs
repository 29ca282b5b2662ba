//! The annotated chart widget.
//!
//! `ChartPanel` owns the series, the annotation store, and all interaction
//! state, and wires egui's per-frame input into the engine:
//!
//! - container resize → base scales recomputed → full scene rebuild
//! - draw-key edges → mode transitions → pan/zoom enabled/disabled
//! - pointer gestures → draw sessions, handle drags, or pan/zoom
//!
//! Each frame ends with one [`render::build_scene`] call against the
//! effective scale pair current at that instant, so every element (series,
//! axes, shapes, handles, preview) is projected fresh and stays aligned
//! with the data through any transform change.

use egui::{Align2, Color32, Pos2, Rect, Stroke, StrokeKind, pos2, vec2};
use image::{Rgba, RgbaImage};

use crate::config::ChartConfig;
use crate::data::annotations::{AnnotationId, AnnotationStore};
use crate::data::scale::{ScalePair, Viewport};
use crate::data::view::ViewTransform;
use crate::events::{AnnotationMeta, ChartEvent, EventHub, EventKind, ResizeMeta, ViewMeta};
use crate::handles::{self, HandleEditor};
use crate::mode::{DrawTrigger, InteractionMode, ModeChange, ModeTracker};
use crate::render::{self, Scene, ScreenShape};
use crate::session::DrawController;

/// Pixel tolerance for hovering an annotation.
const HOVER_TOLERANCE: f32 = 4.0;

/// The central widget: an annotated, pannable, zoomable line chart.
pub struct ChartPanel {
    series: Vec<f64>,
    config: ChartConfig,

    viewport: Viewport,
    base: Option<ScalePair>,
    transform: ViewTransform,

    modes: ModeTracker,
    draw: DrawController,
    handles: HandleEditor,
    store: AnnotationStore,

    hover: Option<AnnotationId>,
    segment_held: bool,
    band_held: bool,

    events: Option<EventHub>,
}

impl ChartPanel {
    /// Create a panel with default configuration.
    pub fn new(series: Vec<f64>) -> Self {
        Self::with_config(series, ChartConfig::default())
    }

    pub fn with_config(series: Vec<f64>, config: ChartConfig) -> Self {
        let events = config.events.clone();
        Self {
            series,
            config,
            viewport: Viewport::default(),
            base: None,
            transform: ViewTransform::IDENTITY,
            modes: ModeTracker::new(),
            draw: DrawController::new(),
            handles: HandleEditor::new(),
            store: AnnotationStore::new(),
            hover: None,
            segment_held: false,
            band_held: false,
            events,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn mode(&self) -> InteractionMode {
        self.modes.mode()
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Render the chart into the available space and process interactions.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let desired = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

        // Resize notification: recompute scales before anything else so the
        // whole frame observes one consistent mapping.
        let viewport = Viewport::new(rect.width(), rect.height());
        if viewport != self.viewport {
            self.viewport = viewport;
            self.base = ScalePair::compute(
                viewport,
                self.config.margins,
                self.series.len(),
                self.config.y_domain,
            );
            // A shrunken surface can leave the panned window outside the new
            // bounds; a zero-delta pan re-clamps it.
            self.transform.pan_by(0.0, 0.0, viewport);
            log::debug!(
                "chart surface resized to {}x{}",
                viewport.width,
                viewport.height
            );
            self.emit_resize(viewport);
        }
        let Some(base) = self.base else {
            // Layout not settled yet (or empty series): nothing to render.
            return response;
        };

        self.process_key_edges(ui.ctx());
        self.process_pointer(ui.ctx(), &response, rect, &base);
        self.process_screenshot(ui.ctx());

        // The transform or the store may have changed above; project
        // everything through the pair current *now*.
        let eff = self.transform.rescale(&base);
        if let Some(scene) = render::build_scene(
            &self.series,
            &self.store,
            self.draw.preview(),
            &eff,
            self.viewport,
            self.config.margins,
        ) {
            self.hover = response
                .hover_pos()
                .map(|p| p - rect.min.to_vec2())
                .and_then(|p| hover_shape(&scene, p));
            self.paint(ui, rect, &scene);
        }
        response
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input processing
    // ─────────────────────────────────────────────────────────────────────

    fn process_key_edges(&mut self, ctx: &egui::Context) {
        let bindings = self.config.bindings.clone();
        let (seg_down, band_down) = ctx.input(|i| {
            (
                bindings.segment.is_down(&i.modifiers),
                bindings.band.is_down(&i.modifiers),
            )
        });
        if seg_down != self.segment_held {
            let change = if seg_down {
                self.modes.key_down(DrawTrigger::Segment)
            } else {
                self.modes.key_up(DrawTrigger::Segment)
            };
            self.segment_held = seg_down;
            self.apply_mode_change(change);
        }
        if band_down != self.band_held {
            let change = if band_down {
                self.modes.key_down(DrawTrigger::Band)
            } else {
                self.modes.key_up(DrawTrigger::Band)
            };
            self.band_held = band_down;
            self.apply_mode_change(change);
        }
    }

    fn apply_mode_change(&mut self, change: ModeChange) {
        match change {
            ModeChange::None => {}
            ModeChange::Entered(mode) => {
                // Drawing takes exclusive pointer control.
                self.handles.end_drag();
                log::debug!("entered {:?} mode", mode);
                self.emit_mode();
            }
            ModeChange::Exited => {
                if self.draw.is_active() {
                    // Releasing the trigger mid-gesture cancels the session:
                    // the preview is discarded and nothing is committed.
                    self.draw.cancel();
                    self.emit(ChartEvent::new(EventKind::SESSION_CANCELLED));
                }
                log::debug!("returned to Navigate mode");
                self.emit_mode();
            }
        }
    }

    fn process_pointer(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        rect: Rect,
        base: &ScalePair,
    ) {
        let eff = self.transform.rescale(base);
        let pointer = ctx
            .input(|i| i.pointer.latest_pos())
            .map(|p| p - rect.min.to_vec2());
        let pressed = ctx.input(|i| i.pointer.primary_pressed());
        let released = ctx.input(|i| i.pointer.primary_released());

        let mode = self.modes.mode();
        if mode.is_drawing() {
            if pressed && response.hovered() {
                if let Some(p) = pointer {
                    if self.draw.pointer_down(mode, p, &eff) {
                        log::debug!("draw session started at {:?}", p);
                    }
                }
            }
            if self.draw.is_active() {
                if let Some(p) = pointer {
                    self.draw.pointer_move(p);
                }
                if released {
                    if let Some(p) = pointer {
                        if let Some(id) = self.draw.pointer_up(p, &eff, &mut self.store) {
                            log::debug!("committed annotation {}", id);
                            self.emit_annotation(EventKind::ANNOTATION_ADDED, id);
                        }
                    }
                }
            }
        } else {
            // Navigate: a press on a band handle starts a resize drag,
            // which takes precedence over pan/zoom for its duration.
            if pressed && response.hovered() {
                if let Some(p) = pointer {
                    let markers = render::band_handles(
                        &self.store,
                        &eff,
                        self.viewport,
                        self.config.margins,
                    );
                    if let Some(hit) = handles::hit_test(&markers, p) {
                        self.handles.begin_drag(hit);
                    }
                }
            }
            if self.handles.is_dragging() {
                if let Some(p) = pointer {
                    self.handles.drag_to(p.x, &eff, &mut self.store);
                }
                if released {
                    if let Some(hit) = self.handles.active() {
                        self.emit_annotation(EventKind::BAND_RESIZED, hit.id);
                    }
                    self.handles.end_drag();
                }
            } else {
                if response.dragged_by(egui::PointerButton::Primary) {
                    let d = response.drag_delta();
                    if d != egui::Vec2::ZERO {
                        self.transform
                            .pan_by(f64::from(d.x), f64::from(d.y), self.viewport);
                        self.emit_view(EventKind::PAN);
                    }
                }
                let scroll = ctx.input(|i| i.raw_scroll_delta);
                if scroll.y != 0.0 && response.hovered() {
                    if let Some(p) = pointer {
                        let factor = 1.0 + f64::from(scroll.y) * 0.001;
                        self.transform.zoom_about(
                            (f64::from(p.x), f64::from(p.y)),
                            factor,
                            self.config.zoom_extent,
                            self.viewport,
                        );
                        self.emit_view(EventKind::ZOOM);
                    }
                }
            }
        }
    }

    fn process_screenshot(&mut self, ctx: &egui::Context) {
        // Hotkey only while navigating so it cannot collide with a held
        // draw modifier.
        if self.modes.mode() == InteractionMode::Navigate {
            let name = self.config.bindings.save_png.to_ascii_uppercase().to_string();
            if let Some(key) = egui::Key::from_name(&name) {
                if ctx.input(|i| i.key_pressed(key)) {
                    // Result arrives as Event::Screenshot on a later frame.
                    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
                    self.emit(ChartEvent::new(EventKind::SCREENSHOT));
                }
            }
        }
        if let Some(image_arc) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        }) {
            save_screenshot_png(&image_arc);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event emission
    // ─────────────────────────────────────────────────────────────────────

    fn emit(&self, event: ChartEvent) {
        if let Some(hub) = &self.events {
            hub.emit(event);
        }
    }

    fn emit_mode(&self) {
        let mut e = ChartEvent::new(EventKind::MODE_CHANGED);
        e.mode = Some(self.modes.mode());
        self.emit(e);
    }

    fn emit_view(&self, kind: EventKind) {
        let mut e = ChartEvent::new(kind);
        e.view = Some(ViewMeta {
            k: self.transform.k,
            tx: self.transform.tx,
            ty: self.transform.ty,
        });
        self.emit(e);
    }

    fn emit_resize(&self, viewport: Viewport) {
        let mut e = ChartEvent::new(EventKind::RESIZE);
        e.resize = Some(ResizeMeta {
            width: viewport.width,
            height: viewport.height,
        });
        self.emit(e);
    }

    fn emit_annotation(&self, kind: EventKind, id: AnnotationId) {
        let mut e = ChartEvent::new(kind);
        if let Some(item) = self.store.get(id) {
            e.annotation = Some(AnnotationMeta {
                id,
                shape: item.shape.clone(),
            });
        }
        self.emit(e);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Painting
    // ─────────────────────────────────────────────────────────────────────

    fn paint(&self, ui: &egui::Ui, rect: Rect, scene: &Scene) {
        let painter = ui.painter_at(rect);
        let to_screen = |p: Pos2| p + rect.min.to_vec2();

        let visuals = ui.visuals();
        let axis_color = if visuals.dark_mode {
            Color32::from_gray(140)
        } else {
            Color32::from_gray(80)
        };
        let text_color = visuals.text_color();
        let plot = Rect::from_min_max(to_screen(scene.plot_rect.min), to_screen(scene.plot_rect.max));

        // Surface border and axis lines.
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, axis_color), StrokeKind::Inside);
        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            Stroke::new(1.0, axis_color),
        );
        painter.line_segment(
            [plot.left_top(), plot.left_bottom()],
            Stroke::new(1.0, axis_color),
        );

        // Ticks from the effective scales.
        let font = egui::FontId::proportional(10.0);
        for t in &scene.x_ticks {
            let x = rect.min.x + t.screen;
            if x < plot.left() - 0.5 || x > plot.right() + 0.5 {
                continue;
            }
            painter.line_segment(
                [pos2(x, plot.bottom()), pos2(x, plot.bottom() + 4.0)],
                Stroke::new(1.0, axis_color),
            );
            painter.text(
                pos2(x, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                &t.label,
                font.clone(),
                text_color,
            );
        }
        for t in &scene.y_ticks {
            let y = rect.min.y + t.screen;
            if y < plot.top() - 0.5 || y > plot.bottom() + 0.5 {
                continue;
            }
            painter.line_segment(
                [pos2(plot.left() - 4.0, y), pos2(plot.left(), y)],
                Stroke::new(1.0, axis_color),
            );
            painter.text(
                pos2(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                &t.label,
                font.clone(),
                text_color,
            );
        }

        // Data content is clipped to the plot area.
        let clipped = painter.with_clip_rect(plot);
        if scene.series.len() >= 2 {
            let pts: Vec<Pos2> = scene.series.iter().map(|p| to_screen(*p)).collect();
            clipped.add(egui::Shape::line(
                pts,
                Stroke::new(self.config.series_look.width, self.config.series_look.color),
            ));
        }

        for s in &scene.shapes {
            let mut look = s.look;
            if self.hover == Some(s.id) {
                look.width = (look.width * 1.6).max(look.width + 1.0);
            }
            match s.shape {
                ScreenShape::Segment { a, b } => {
                    clipped.line_segment(
                        [to_screen(a), to_screen(b)],
                        Stroke::new(look.width, look.color),
                    );
                }
                ScreenShape::Band { rect: r } => {
                    let r = Rect::from_min_max(to_screen(r.min), to_screen(r.max));
                    if let Some(fill) = look.fill {
                        clipped.rect_filled(r, 0.0, fill);
                    }
                    clipped.rect_stroke(r, 0.0, Stroke::new(look.width, look.color), StrokeKind::Inside);
                }
            }
        }

        // Edge handles, re-derived this frame by the scene builder.
        for h in &scene.handles {
            let x = rect.min.x + h.x;
            let top = rect.min.y + h.top;
            let bottom = rect.min.y + h.bottom;
            clipped.line_segment(
                [pos2(x, top), pos2(x, bottom)],
                Stroke::new(1.0, Color32::from_gray(160)),
            );
            let grip = Rect::from_center_size(pos2(x, (top + bottom) * 0.5), vec2(6.0, 18.0));
            clipped.rect_filled(grip, 2.0, Color32::from_gray(160));
        }

        // The live preview, dashed to read as transient.
        if let Some(p) = &scene.preview {
            match p {
                ScreenShape::Segment { a, b } => {
                    clipped.extend(egui::Shape::dashed_line(
                        &[to_screen(*a), to_screen(*b)],
                        Stroke::new(1.5, self.config.segment_look.color),
                        6.0,
                        4.0,
                    ));
                }
                ScreenShape::Band { rect: r } => {
                    let r = Rect::from_min_max(to_screen(r.min), to_screen(r.max));
                    if let Some(fill) = self.config.band_look.fill {
                        clipped.rect_filled(r, 0.0, fill);
                    }
                    clipped.rect_stroke(
                        r,
                        0.0,
                        Stroke::new(1.0, self.config.band_look.color),
                        StrokeKind::Inside,
                    );
                }
            }
        }
    }
}

/// Find the annotation under the pointer, nearest first.
fn hover_shape(scene: &Scene, pointer: Pos2) -> Option<AnnotationId> {
    let mut best: Option<(f32, AnnotationId)> = None;
    for s in &scene.shapes {
        let d = match s.shape {
            ScreenShape::Segment { a, b } => dist_to_segment(pointer, a, b),
            ScreenShape::Band { rect } => {
                if rect.contains(pointer) {
                    0.0
                } else {
                    continue;
                }
            }
        };
        if d <= HOVER_TOLERANCE && best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, s.id));
        }
    }
    best.map(|(_, id)| id)
}

fn dist_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_sq();
    if len2 <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Convert an egui screenshot to PNG and save it to the temp directory.
fn save_screenshot_png(image: &egui::ColorImage) {
    let egui::ColorImage {
        size: [w, h],
        pixels,
        ..
    } = image;
    let mut out = RgbaImage::new(*w as u32, *h as u32);
    for y in 0..*h {
        for x in 0..*w {
            let p = pixels[y * *w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = std::env::temp_dir().join(format!("plotmark_{}.png", secs));
    match out.save(&path) {
        Ok(()) => log::info!("saved screenshot to {:?}", path),
        Err(e) => log::error!("failed to save screenshot: {}", e),
    }
}
