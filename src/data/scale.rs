//! Invertible linear data↔screen scales and the viewport/margins they derive from.
//!
//! A [`ScalePair`] is the base mapping between series coordinates (sample
//! index on x, sample value on y) and surface pixels. The pair is recomputed
//! whenever the viewport changes and is deliberately *not* aware of pan/zoom;
//! the view transform composes on top of it (see [`crate::data::view`]).

use serde::{Deserialize, Serialize};

/// Size of the rendering surface in logical pixels.
///
/// Zero until the first layout pass has settled; nothing is computed or
/// painted while [`is_ready`](Self::is_ready) is false.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are strictly positive.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Plot margins in pixels between the surface edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
        }
    }
}

/// An invertible linear mapping from a data-space domain to a screen-space range.
///
/// The range may be descending (the y scale maps larger values to smaller
/// pixel coordinates); `apply` and `invert` are exact inverses of each other
/// up to floating-point error either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a data value to its screen coordinate.
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            // Degenerate domain (single-sample series): collapse to range start.
            return r0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a screen coordinate back to the data value that projects onto it.
    pub fn invert(&self, p: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (p - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// The x/y scale pair for one chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePair {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl ScalePair {
    /// Derive the base scales from the viewport, margins, and series extent.
    ///
    /// x domain is `[0, n-1]` (index space), y domain is the configured fixed
    /// value range. The y range is descending so larger values render higher
    /// on screen. Returns `None` while the layout has not settled or the
    /// series is empty; calling twice with equal inputs yields equal scales.
    pub fn compute(
        viewport: Viewport,
        margins: Margins,
        sample_count: usize,
        y_domain: (f64, f64),
    ) -> Option<ScalePair> {
        if !viewport.is_ready() || sample_count == 0 {
            return None;
        }
        let x = LinearScale::new(
            (0.0, (sample_count - 1) as f64),
            (
                f64::from(margins.left),
                f64::from(viewport.width - margins.right),
            ),
        );
        let y = LinearScale::new(
            y_domain,
            (
                f64::from(viewport.height - margins.bottom),
                f64::from(margins.top),
            ),
        );
        Some(ScalePair { x, y })
    }
}
