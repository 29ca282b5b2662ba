use egui::pos2;
use plotmark::render::{build_scene, ScreenShape};
use plotmark::session::{DrawController, DrawKind};
use plotmark::{
    Annotation, AnnotationStore, InteractionMode, Margins, ScaleExtent, ScalePair, ViewTransform,
    Viewport,
};

const VP: Viewport = Viewport {
    width: 640.0,
    height: 400.0,
};

fn pair() -> ScalePair {
    ScalePair::compute(VP, Margins::default(), 20, (-15.0, 15.0)).unwrap()
}

fn series() -> Vec<f64> {
    (0..20).map(|i| ((i as f64) * 0.7).sin() * 10.0).collect()
}

#[test]
fn no_scene_while_layout_not_ready() {
    let store = AnnotationStore::new();
    let scene = build_scene(
        &series(),
        &store,
        None,
        &pair(),
        Viewport::new(0.0, 0.0),
        Margins::default(),
    );
    assert!(scene.is_none());
}

#[test]
fn empty_store_renders_chart_only() {
    let store = AnnotationStore::new();
    let scene = build_scene(&series(), &store, None, &pair(), VP, Margins::default()).unwrap();
    assert_eq!(scene.series.len(), 20);
    assert!(scene.shapes.is_empty());
    assert!(scene.handles.is_empty());
    assert!(scene.preview.is_none());
    assert!(!scene.x_ticks.is_empty());
    assert!(!scene.y_ticks.is_empty());
}

#[test]
fn rendering_twice_yields_identical_geometry() {
    let mut store = AnnotationStore::new();
    store.append(Annotation::Segment {
        start: [3.0, -5.0],
        end: [7.0, 5.0],
    });
    store.append(Annotation::Band {
        x_start: 10.0,
        x_end: 14.0,
    });
    let eff = ViewTransform {
        k: 2.5,
        tx: -300.0,
        ty: -120.0,
    }
    .rescale(&pair());
    let s = series();
    let a = build_scene(&s, &store, None, &eff, VP, Margins::default()).unwrap();
    let b = build_scene(&s, &store, None, &eff, VP, Margins::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn annotations_project_through_the_current_transform() {
    // Committed coordinates must render at effectiveScale(value) recomputed
    // from the transform of the moment, never at positions cached earlier.
    let base = pair();
    let mut store = AnnotationStore::new();
    store.append(Annotation::Segment {
        start: [3.0, -5.0],
        end: [7.0, 5.0],
    });

    let mut t = ViewTransform::IDENTITY;
    let transforms = {
        let mut v = vec![t];
        t.zoom_about((300.0, 180.0), 2.0, ScaleExtent::default(), VP);
        v.push(t);
        t.pan_by(-55.0, 30.0, VP);
        v.push(t);
        t.zoom_about((100.0, 100.0), 1.7, ScaleExtent::default(), VP);
        v.push(t);
        v
    };

    for t in transforms {
        let eff = t.rescale(&base);
        let scene = build_scene(&series(), &store, None, &eff, VP, Margins::default()).unwrap();
        match scene.shapes[0].shape {
            ScreenShape::Segment { a, b } => {
                assert!((f64::from(a.x) - eff.x.apply(3.0)).abs() < 1e-3);
                assert!((f64::from(a.y) - eff.y.apply(-5.0)).abs() < 1e-3);
                assert!((f64::from(b.x) - eff.x.apply(7.0)).abs() < 1e-3);
                assert!((f64::from(b.y) - eff.y.apply(5.0)).abs() < 1e-3);
            }
            _ => panic!("expected a segment"),
        }
    }
}

#[test]
fn bands_span_the_plot_height() {
    let mut store = AnnotationStore::new();
    store.append(Annotation::Band {
        x_start: 2.0,
        x_end: 8.0,
    });
    let scene = build_scene(&series(), &store, None, &pair(), VP, Margins::default()).unwrap();
    match scene.shapes[0].shape {
        ScreenShape::Band { rect } => {
            assert_eq!(rect.top(), 20.0);
            assert_eq!(rect.bottom(), 380.0);
        }
        _ => panic!("expected a band"),
    }
}

#[test]
fn series_path_follows_the_effective_pair() {
    let base = pair();
    let s = series();
    let t = ViewTransform {
        k: 3.0,
        tx: -500.0,
        ty: -200.0,
    };
    let eff = t.rescale(&base);
    let store = AnnotationStore::new();
    let scene = build_scene(&s, &store, None, &eff, VP, Margins::default()).unwrap();
    for (i, p) in scene.series.iter().enumerate() {
        assert!((f64::from(p.x) - eff.x.apply(i as f64)).abs() < 1e-3);
        assert!((f64::from(p.y) - eff.y.apply(s[i])).abs() < 1e-3);
    }
}

#[test]
fn preview_keeps_its_end_point_in_screen_space() {
    let base = pair();
    let mut draw = DrawController::new();
    draw.pointer_down(InteractionMode::DrawSegment, pos2(100.0, 100.0), &base);
    draw.pointer_move(pos2(150.0, 120.0));

    let store = AnnotationStore::new();
    let scene = build_scene(
        &series(),
        &store,
        draw.preview(),
        &base,
        VP,
        Margins::default(),
    )
    .unwrap();
    match scene.preview.unwrap() {
        ScreenShape::Segment { a, b } => {
            // Anchor is projected from data space; end is the raw pointer.
            assert!((f64::from(a.x) - 100.0).abs() < 1e-3);
            assert!((f64::from(a.y) - 100.0).abs() < 1e-3);
            assert_eq!(b, pos2(150.0, 120.0));
        }
        _ => panic!("expected a segment preview"),
    }
}

#[test]
fn band_preview_spans_anchor_to_pointer() {
    let base = pair();
    let mut draw = DrawController::new();
    draw.pointer_down(InteractionMode::DrawBand, pos2(400.0, 200.0), &base);
    draw.pointer_move(pos2(250.0, 240.0));

    let store = AnnotationStore::new();
    let scene = build_scene(
        &series(),
        &store,
        draw.preview(),
        &base,
        VP,
        Margins::default(),
    )
    .unwrap();
    match scene.preview.unwrap() {
        ScreenShape::Band { rect } => {
            assert!((f64::from(rect.left()) - 250.0).abs() < 1e-3);
            assert!((f64::from(rect.right()) - 400.0).abs() < 1e-3);
            assert_eq!(rect.top(), 20.0);
            assert_eq!(rect.bottom(), 380.0);
        }
        _ => panic!("expected a band preview"),
    }
}

#[test]
fn draw_kind_matches_session_kind() {
    let base = pair();
    let mut draw = DrawController::new();
    draw.pointer_down(InteractionMode::DrawBand, pos2(400.0, 200.0), &base);
    assert_eq!(draw.session().unwrap().kind, DrawKind::Band);
}

#[test]
fn ticks_lie_within_the_visible_window() {
    let base = pair();
    let mut t = ViewTransform::IDENTITY;
    t.zoom_about((320.0, 200.0), 4.0, ScaleExtent::default(), VP);
    let eff = t.rescale(&base);
    let store = AnnotationStore::new();
    let scene = build_scene(&series(), &store, None, &eff, VP, Margins::default()).unwrap();

    assert!(!scene.x_ticks.is_empty());
    for tick in &scene.x_ticks {
        let v = eff.x.invert(f64::from(tick.screen));
        let lo = eff.x.invert(20.0);
        let hi = eff.x.invert(620.0);
        assert!(v >= lo.min(hi) - 1e-4 && v <= lo.max(hi) + 1e-4);
    }
}
