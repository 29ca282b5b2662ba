//! Pan/zoom view transform applied on top of the base scale pair.
//!
//! The transform is a uniform scale factor plus a translation, the affine
//! part of the mapping the user manipulates with drag and wheel gestures.
//! It never touches the annotation model: rescaling the base pair through
//! the current transform yields the *effective* pair, and every element is
//! projected through that fresh on each render pass.

use crate::data::scale::{LinearScale, ScalePair, Viewport};

/// Allowed zoom factor range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

/// The current pan/zoom state: `screen' = k * screen + t` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub k: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        k: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn apply_x(&self, sx: f64) -> f64 {
        self.k * sx + self.tx
    }

    fn apply_y(&self, sy: f64) -> f64 {
        self.k * sy + self.ty
    }

    /// Compose this transform with the base pair, producing the effective
    /// pair used for all rendering and pointer inversion.
    ///
    /// Domains are untouched; only the ranges are pushed through the affine
    /// map, so `effective.apply(v) == k * base.apply(v) + t` for every `v`.
    pub fn rescale(&self, base: &ScalePair) -> ScalePair {
        ScalePair {
            x: LinearScale::new(
                base.x.domain,
                (self.apply_x(base.x.range.0), self.apply_x(base.x.range.1)),
            ),
            y: LinearScale::new(
                base.y.domain,
                (self.apply_y(base.y.range.0), self.apply_y(base.y.range.1)),
            ),
        }
    }

    /// Multiply the zoom factor about a fixed screen point, clamping the
    /// factor to `extent` and the translation to the viewport bounds.
    ///
    /// The data point under `at` stays under `at` (up to translation
    /// clamping at the edges).
    pub fn zoom_about(
        &mut self,
        at: (f64, f64),
        factor: f64,
        extent: ScaleExtent,
        viewport: Viewport,
    ) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let k1 = (self.k * factor).clamp(extent.min, extent.max);
        let ratio = k1 / self.k;
        self.tx = at.0 - ratio * (at.0 - self.tx);
        self.ty = at.1 - ratio * (at.1 - self.ty);
        self.k = k1;
        self.clamp_translation(viewport);
    }

    /// Translate by a screen-space delta, clamping to the viewport bounds.
    pub fn pan_by(&mut self, dx: f64, dy: f64, viewport: Viewport) {
        self.tx += dx;
        self.ty += dy;
        self.clamp_translation(viewport);
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Keep the panned window inside `[[0,0],[width,height]]`: the transform
    /// may never expose space beyond the data bounds.
    fn clamp_translation(&mut self, viewport: Viewport) {
        let w = f64::from(viewport.width);
        let h = f64::from(viewport.height);
        let lo_x = ((1.0 - self.k) * w).min(0.0);
        let lo_y = ((1.0 - self.k) * h).min(0.0);
        self.tx = self.tx.clamp(lo_x, 0.0);
        self.ty = self.ty.clamp(lo_y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::scale::Margins;

    fn base_pair() -> ScalePair {
        ScalePair::compute(
            Viewport::new(640.0, 400.0),
            Margins::default(),
            20,
            (-15.0, 15.0),
        )
        .unwrap()
    }

    #[test]
    fn identity_rescale_is_a_noop() {
        let base = base_pair();
        let eff = ViewTransform::IDENTITY.rescale(&base);
        assert_eq!(base, eff);
    }

    #[test]
    fn zoom_is_clamped_to_extent() {
        let vp = Viewport::new(640.0, 400.0);
        let mut t = ViewTransform::IDENTITY;
        t.zoom_about((320.0, 200.0), 100.0, ScaleExtent::default(), vp);
        assert_eq!(t.k, 10.0);
        t.zoom_about((320.0, 200.0), 1e-6, ScaleExtent::default(), vp);
        assert_eq!(t.k, 1.0);
    }

    #[test]
    fn pan_cannot_leave_data_bounds() {
        let vp = Viewport::new(640.0, 400.0);
        let mut t = ViewTransform::IDENTITY;
        t.zoom_about((0.0, 0.0), 2.0, ScaleExtent::default(), vp);
        t.pan_by(1e6, -1e6, vp);
        assert_eq!(t.tx, 0.0);
        assert_eq!(t.ty, -400.0);
    }
}
