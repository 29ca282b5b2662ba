//! Visual appearance of the series path and annotation shapes.

use egui::Color32;

/// Stroke and optional fill for one rendered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeLook {
    pub color: Color32,
    pub width: f32,
    /// Fill color for area shapes; `None` for pure strokes.
    pub fill: Option<Color32>,
}

impl Default for ShapeLook {
    fn default() -> Self {
        Self {
            color: Color32::GRAY,
            width: 1.0,
            fill: None,
        }
    }
}

impl ShapeLook {
    /// Look of the series path itself.
    pub fn series() -> Self {
        Self {
            color: Color32::from_rgb(70, 130, 180),
            width: 1.5,
            fill: None,
        }
    }

    /// Look of committed segment annotations.
    pub fn segment() -> Self {
        Self {
            color: Color32::from_rgb(220, 50, 47),
            width: 2.0,
            fill: None,
        }
    }

    /// Look of committed band annotations.
    pub fn band() -> Self {
        Self {
            color: Color32::from_rgb(181, 137, 0),
            width: 1.0,
            fill: Some(Color32::from_rgba_unmultiplied(181, 137, 0, 40)),
        }
    }
}
