//! The drawing surface the engine rasterizes into.
//!
//! Shaped after the Canvas 2D context: stateful fill/stroke styles, a
//! current path, and save/restore scoping of transform and style. The
//! browser backend forwards each call to `CanvasRenderingContext2d`; the
//! [`RecordingSurface`](crate::recording::RecordingSurface) logs them.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Font family plus pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    pub size_px: f64,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, size_px: f64) -> Self {
        Self {
            name: name.into(),
            size_px,
        }
    }

    /// CSS shorthand, e.g. `15px monospace`.
    pub fn to_css(&self) -> String {
        format!("{}px {}", self.size_px, self.name)
    }
}

pub trait Surface {
    /// Pixel dimensions `(width, height)`.
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    /// On-screen top-left of the surface in client coordinates.
    fn client_origin(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn set_fill_color(&mut self, color: Rgba);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    /// Set the text font. Text is laid out from a hanging baseline.
    fn set_font(&mut self, font: &FontSpec);

    fn begin_path(&mut self);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, counter_clockwise: bool);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Push a transform/style scope.
    fn save(&mut self);
    /// Pop a transform/style scope.
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, x: f64, y: f64);
}
