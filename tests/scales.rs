use plotmark::{LinearScale, Margins, ScaleExtent, ScalePair, ViewTransform, Viewport};

fn base_pair() -> ScalePair {
    ScalePair::compute(
        Viewport::new(640.0, 400.0),
        Margins::default(),
        20,
        (-15.0, 15.0),
    )
    .expect("viewport is ready")
}

#[test]
fn no_scales_while_layout_not_ready() {
    let vp = Viewport::new(0.0, 0.0);
    assert!(ScalePair::compute(vp, Margins::default(), 20, (-15.0, 15.0)).is_none());
    let vp = Viewport::new(640.0, 0.0);
    assert!(ScalePair::compute(vp, Margins::default(), 20, (-15.0, 15.0)).is_none());
}

#[test]
fn no_scales_for_empty_series() {
    let vp = Viewport::new(640.0, 400.0);
    assert!(ScalePair::compute(vp, Margins::default(), 0, (-15.0, 15.0)).is_none());
}

#[test]
fn ranges_derive_from_viewport_and_margins() {
    let pair = base_pair();
    assert_eq!(pair.x.domain, (0.0, 19.0));
    assert_eq!(pair.x.range, (20.0, 620.0));
    assert_eq!(pair.y.domain, (-15.0, 15.0));
    assert_eq!(pair.y.range, (380.0, 20.0));
}

#[test]
fn recomputation_is_idempotent() {
    let vp = Viewport::new(640.0, 400.0);
    let a = ScalePair::compute(vp, Margins::default(), 20, (-15.0, 15.0)).unwrap();
    let b = ScalePair::compute(vp, Margins::default(), 20, (-15.0, 15.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invertibility_within_tolerance() {
    let pair = base_pair();
    for p in [20.0, 77.5, 320.0, 619.9, 620.0] {
        assert!((pair.x.apply(pair.x.invert(p)) - p).abs() < 1e-9);
    }
    for p in [20.0, 133.0, 200.0, 380.0] {
        assert!((pair.y.apply(pair.y.invert(p)) - p).abs() < 1e-9);
    }
}

#[test]
fn invertibility_survives_the_view_transform() {
    let pair = base_pair();
    let vp = Viewport::new(640.0, 400.0);
    let mut t = ViewTransform::IDENTITY;
    t.zoom_about((300.0, 200.0), 3.0, ScaleExtent::default(), vp);
    t.pan_by(-40.0, 25.0, vp);
    let eff = t.rescale(&pair);
    for p in [50.0, 200.0, 511.0] {
        assert!((eff.x.apply(eff.x.invert(p)) - p).abs() < 1e-9);
        assert!((eff.y.apply(eff.y.invert(p)) - p).abs() < 1e-9);
    }
}

#[test]
fn effective_scale_is_affine_in_the_base_scale() {
    let pair = base_pair();
    let t = ViewTransform {
        k: 2.0,
        tx: -150.0,
        ty: -80.0,
    };
    let eff = t.rescale(&pair);
    for v in [0.0, 4.5, 10.0, 19.0] {
        let expected = 2.0 * pair.x.apply(v) - 150.0;
        assert!((eff.x.apply(v) - expected).abs() < 1e-9);
    }
    for v in [-15.0, -1.0, 0.0, 15.0] {
        let expected = 2.0 * pair.y.apply(v) - 80.0;
        assert!((eff.y.apply(v) - expected).abs() < 1e-9);
    }
}

#[test]
fn zoom_keeps_the_cursor_point_fixed() {
    let vp = Viewport::new(640.0, 400.0);
    let pair = base_pair();
    let at = (335.0, 170.0);
    let data_x = pair.x.invert(at.0);

    let mut t = ViewTransform::IDENTITY;
    t.zoom_about(at, 2.0, ScaleExtent::default(), vp);
    let eff = t.rescale(&pair);
    assert!((eff.x.apply(data_x) - at.0).abs() < 1e-9);
}

#[test]
fn zoom_factor_is_clamped() {
    let vp = Viewport::new(640.0, 400.0);
    let mut t = ViewTransform::IDENTITY;
    for _ in 0..100 {
        t.zoom_about((320.0, 200.0), 1.5, ScaleExtent::default(), vp);
    }
    assert_eq!(t.k, 10.0);
    for _ in 0..100 {
        t.zoom_about((320.0, 200.0), 0.5, ScaleExtent::default(), vp);
    }
    assert_eq!(t.k, 1.0);
    assert_eq!(t, ViewTransform::IDENTITY);
}

#[test]
fn pan_is_clamped_to_the_data_window() {
    let vp = Viewport::new(640.0, 400.0);
    let mut t = ViewTransform::IDENTITY;

    // At identity zoom there is nothing to pan.
    t.pan_by(100.0, -100.0, vp);
    assert_eq!(t, ViewTransform::IDENTITY);

    t.zoom_about((320.0, 200.0), 4.0, ScaleExtent::default(), vp);
    t.pan_by(-1e9, -1e9, vp);
    assert_eq!(t.tx, (1.0 - t.k) * 640.0);
    assert_eq!(t.ty, (1.0 - t.k) * 400.0);
}

#[test]
fn degenerate_single_sample_domain_is_safe() {
    let pair = ScalePair::compute(
        Viewport::new(640.0, 400.0),
        Margins::default(),
        1,
        (-15.0, 15.0),
    )
    .unwrap();
    assert_eq!(pair.x.domain, (0.0, 0.0));
    assert_eq!(pair.x.apply(0.0), 20.0);
    assert_eq!(pair.x.invert(300.0), 0.0);
}

#[test]
fn descending_y_range_maps_sign_correctly() {
    let s = LinearScale::new((-15.0, 15.0), (380.0, 20.0));
    assert!(s.apply(10.0) < s.apply(-10.0));
}
