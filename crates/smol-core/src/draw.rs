//! Drawing state machine layered over a [`Surface`].
//!
//! `Canvas` is what sketch callbacks receive. It tracks fill/stroke
//! activation, the current colors and weight, and a push/pop stack that
//! mirrors the surface's save/restore scopes. Colors and weight are scoped
//! by push/pop (the surface restores them too); the activation flags are not.
//!
//! Shape semantics:
//! - `rect` and `text` always fill, whatever `fill_active` says.
//! - `line` always strokes, whatever `stroke_active` says.
//! - `circle` strokes if stroke is active, then fills if fill is active.
//! - `background` paints the whole surface and leaves its color as the
//!   current fill (with fill activated).

use crate::color::Rgba;
use crate::error::SketchError;
use crate::input::Pointer;
use crate::math;
use crate::surface::{FontSpec, Surface};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::TAU;

/// Style values tracked alongside the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub fill_active: bool,
    pub stroke_active: bool,
    pub stroke_weight: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        // Canvas 2D defaults: black fill and stroke, 1px lines.
        Self {
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
            fill_active: false,
            stroke_active: false,
            stroke_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StyleSnapshot {
    fill: Rgba,
    stroke: Rgba,
    stroke_weight: f64,
}

pub struct Canvas<S: Surface> {
    surface: S,
    state: DrawState,
    scopes: Vec<StyleSnapshot>,
    /// `transform_pop` never goes below this depth.
    scope_floor: usize,
    refused_pops: u64,
    font: Option<FontSpec>,
    width: u32,
    height: u32,
    pub(crate) pointer: Pointer,
    pub(crate) fps: f64,
    rng: StdRng,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S, seed: u64) -> Self {
        let (width, height) = surface.size();
        Self {
            surface,
            state: DrawState::default(),
            scopes: Vec::new(),
            scope_floor: 0,
            refused_pops: 0,
            font: None,
            width,
            height,
            pointer: Pointer::default(),
            fps: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mouse_x(&self) -> f64 {
        self.pointer.x
    }

    pub fn mouse_y(&self) -> f64 {
        self.pointer.y
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn current_font(&self) -> Option<&FontSpec> {
        self.font.as_ref()
    }

    // ─── Sizing and text setup ──────────────────────────────────────────

    /// Resize the surface. `height` defaults to `width`.
    ///
    /// Resizing resets a canvas context, so the current colors, line width
    /// and font are sent to the surface again.
    pub fn size(&mut self, width: u32, height: Option<u32>) {
        let height = height.unwrap_or(width);
        self.width = width;
        self.height = height;
        self.surface.resize(width, height);
        self.surface.set_fill_color(self.state.fill);
        self.surface.set_stroke_color(self.state.stroke);
        self.surface.set_line_width(self.state.stroke_weight);
        if let Some(font) = &self.font {
            self.surface.set_font(font);
        }
        log::debug!("surface resized to {width}x{height}");
    }

    pub fn font(&mut self, name: &str, size_px: f64) {
        let font = FontSpec::new(name, size_px);
        self.surface.set_font(&font);
        self.font = Some(font);
    }

    // ─── Fill and stroke state ──────────────────────────────────────────

    pub fn fill(&mut self, gray: f64) {
        self.set_fill(Rgba::gray(gray));
    }

    pub fn fill_alpha(&mut self, gray: f64, alpha: f64) {
        self.set_fill(Rgba::gray_alpha(gray, alpha));
    }

    pub fn fill_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.set_fill(Rgba::rgb(r, g, b));
    }

    pub fn fill_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.set_fill(Rgba::rgba(r, g, b, a));
    }

    pub fn no_fill(&mut self) {
        self.state.fill_active = false;
    }

    pub fn stroke_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.set_stroke(Rgba::rgb(r, g, b));
    }

    pub fn stroke_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.set_stroke(Rgba::rgba(r, g, b, a));
    }

    pub fn no_stroke(&mut self) {
        self.state.stroke_active = false;
    }

    pub fn stroke_weight(&mut self, weight: f64) {
        self.state.stroke_weight = weight;
        self.surface.set_line_width(weight);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.state.fill = color;
        self.state.fill_active = true;
        self.surface.set_fill_color(color);
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.state.stroke = color;
        self.state.stroke_active = true;
        self.surface.set_stroke_color(color);
    }

    // ─── Shapes ─────────────────────────────────────────────────────────

    pub fn background(&mut self, gray: f64) {
        self.background_rgb(gray, gray, gray);
    }

    pub fn background_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.fill_rgb(r, g, b);
        self.surface
            .fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.surface.begin_path();
        self.surface.line_to(x1, y1);
        self.surface.line_to(x2, y2);
        self.surface.stroke();
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.surface.fill_rect(x, y, width, height);
    }

    pub fn circle(&mut self, x: f64, y: f64, radius: f64) {
        self.surface.begin_path();
        self.surface.arc(x, y, radius, 0.0, TAU, true);
        if self.state.stroke_active {
            self.surface.stroke();
        }
        if self.state.fill_active {
            self.surface.fill();
        }
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str) {
        self.surface.fill_text(text, x, y);
    }

    // ─── Transform scopes ───────────────────────────────────────────────

    pub fn transform_push(&mut self) {
        self.scopes.push(StyleSnapshot {
            fill: self.state.fill,
            stroke: self.state.stroke,
            stroke_weight: self.state.stroke_weight,
        });
        self.surface.save();
    }

    /// Pop one scope. Popping with nothing pushed, or below the scope the
    /// host opened for the current frame, is ignored.
    pub fn transform_pop(&mut self) {
        if self.scopes.len() <= self.scope_floor {
            self.refused_pops += 1;
            log::debug!("transform_pop with no matching push ignored");
            return;
        }
        self.pop_scope();
    }

    fn pop_scope(&mut self) {
        let Some(snap) = self.scopes.pop() else {
            return;
        };
        self.state.fill = snap.fill;
        self.state.stroke = snap.stroke;
        self.state.stroke_weight = snap.stroke_weight;
        self.surface.restore();
    }

    /// Number of currently open push scopes.
    pub fn transform_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Pop scopes until only `depth` remain. Returns how many were popped.
    pub fn restore_to(&mut self, depth: usize) -> usize {
        let mut popped = 0;
        while self.scopes.len() > depth {
            self.pop_scope();
            popped += 1;
        }
        popped
    }

    pub(crate) fn set_scope_floor(&mut self, depth: usize) {
        self.scope_floor = depth;
    }

    /// Pops refused so far because nothing above the floor was open.
    pub fn refused_pops(&self) -> u64 {
        self.refused_pops
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.surface.translate(x, y);
    }

    /// Rotate by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        self.surface.rotate(degrees * std::f64::consts::PI / 180.0);
    }

    /// Scale; `y` defaults to `x`.
    pub fn scale(&mut self, x: f64, y: Option<f64>) {
        self.surface.scale(x, y.unwrap_or(x));
    }

    // ─── Randomness ─────────────────────────────────────────────────────

    /// See [`math::random`].
    pub fn random(&mut self, args: &[f64]) -> Result<f64, SketchError> {
        math::random(&mut self.rng, args)
    }

    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        math::random_range(&mut self.rng, min, max)
    }

    pub fn shuffle<'a, T>(&mut self, items: &'a mut [T]) -> &'a mut [T] {
        math::shuffle(&mut self.rng, items)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{CommandLog, DrawCommand, RecordingSurface};

    fn canvas() -> (Canvas<RecordingSurface>, CommandLog) {
        let surface = RecordingSurface::new(200, 100);
        let log = surface.log();
        (Canvas::new(surface, 1), log)
    }

    #[test]
    fn fill_and_stroke_set_flags() {
        let (mut c, _) = canvas();
        assert!(!c.state().fill_active);
        c.fill_rgb(1.0, 0.0, 0.0);
        assert!(c.state().fill_active);
        assert_eq!(c.state().fill, Rgba::rgb(1.0, 0.0, 0.0));
        c.no_fill();
        assert!(!c.state().fill_active);

        c.stroke_rgba(0.0, 1.0, 0.0, 0.5);
        assert!(c.state().stroke_active);
        c.no_stroke();
        assert!(!c.state().stroke_active);
        assert_eq!(c.state().stroke, Rgba::rgba(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn gray_fill_with_alpha() {
        let (mut c, _) = canvas();
        c.fill_alpha(0.5, 0.25);
        assert_eq!(c.state().fill, Rgba::rgba(0.5, 0.5, 0.5, 0.25));
    }

    #[test]
    fn background_covers_surface_and_sets_fill() {
        let (mut c, log) = canvas();
        c.no_fill();
        c.background(0.2);
        assert!(c.state().fill_active);
        assert_eq!(c.state().fill, Rgba::gray(0.2));
        assert_eq!(
            log.take(),
            vec![
                DrawCommand::SetFillColor { color: Rgba::gray(0.2) },
                DrawCommand::FillRect { x: 0.0, y: 0.0, width: 200.0, height: 100.0 },
            ]
        );
    }

    #[test]
    fn rect_fills_even_when_fill_inactive() {
        let (mut c, log) = canvas();
        c.no_fill();
        c.rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(log.count(|cmd| matches!(cmd, DrawCommand::FillRect { .. })), 1);
    }

    #[test]
    fn line_strokes_even_when_stroke_inactive() {
        let (mut c, log) = canvas();
        c.no_stroke();
        c.line(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            log.take(),
            vec![
                DrawCommand::BeginPath,
                DrawCommand::LineTo { x: 0.0, y: 0.0 },
                DrawCommand::LineTo { x: 10.0, y: 10.0 },
                DrawCommand::Stroke,
            ]
        );
    }

    #[test]
    fn circle_strokes_then_fills_when_both_active() {
        let (mut c, log) = canvas();
        c.fill(1.0);
        c.stroke_rgb(1.0, 1.0, 1.0);
        log.take();
        c.circle(5.0, 5.0, 3.0);
        let cmds = log.take();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[1], DrawCommand::Arc { radius, .. } if radius == 3.0));
        assert_eq!(cmds[2], DrawCommand::Stroke);
        assert_eq!(cmds[3], DrawCommand::Fill);
    }

    #[test]
    fn circle_respects_inactive_flags() {
        let (mut c, log) = canvas();
        c.circle(5.0, 5.0, 3.0);
        assert_eq!(log.count(|cmd| matches!(cmd, DrawCommand::Fill | DrawCommand::Stroke)), 0);

        c.fill(1.0);
        c.circle(5.0, 5.0, 3.0);
        assert_eq!(log.count(|cmd| *cmd == DrawCommand::Fill), 1);
        assert_eq!(log.count(|cmd| *cmd == DrawCommand::Stroke), 0);
    }

    #[test]
    fn rotate_takes_degrees() {
        let (mut c, log) = canvas();
        c.rotate(180.0);
        let cmds = log.take();
        assert!(matches!(
            cmds.as_slice(),
            [DrawCommand::Rotate { radians }] if (radians - std::f64::consts::PI).abs() < 1e-12
        ));
    }

    #[test]
    fn scale_defaults_y_to_x() {
        let (mut c, log) = canvas();
        c.scale(2.0, None);
        c.scale(2.0, Some(3.0));
        assert_eq!(
            log.take(),
            vec![
                DrawCommand::Scale { x: 2.0, y: 2.0 },
                DrawCommand::Scale { x: 2.0, y: 3.0 },
            ]
        );
    }

    #[test]
    fn size_defaults_height_to_width() {
        let (mut c, _) = canvas();
        c.size(500, None);
        assert_eq!((c.width(), c.height()), (500, 500));
        assert_eq!(c.surface().size(), (500, 500));
        c.size(640, Some(480));
        assert_eq!((c.width(), c.height()), (640, 480));
    }

    #[test]
    fn resize_reapplies_styles_and_font() {
        let (mut c, log) = canvas();
        c.fill_rgb(1.0, 0.0, 0.0);
        c.stroke_rgb(0.0, 1.0, 0.0);
        c.stroke_weight(3.0);
        c.font("serif", 12.0);
        log.take();

        c.size(320, Some(240));
        assert_eq!(
            log.take(),
            vec![
                DrawCommand::Resize { width: 320, height: 240 },
                DrawCommand::SetFillColor { color: Rgba::rgb(1.0, 0.0, 0.0) },
                DrawCommand::SetStrokeColor { color: Rgba::rgb(0.0, 1.0, 0.0) },
                DrawCommand::SetLineWidth { width: 3.0 },
                DrawCommand::SetFont { font: FontSpec::new("serif", 12.0) },
            ]
        );
    }

    #[test]
    fn pop_stops_at_scope_floor() {
        let (mut c, _) = canvas();
        c.transform_push();
        c.set_scope_floor(1);
        c.transform_pop();
        assert_eq!(c.transform_depth(), 1);
        assert_eq!(c.refused_pops(), 1);

        c.transform_push();
        c.transform_pop();
        assert_eq!(c.transform_depth(), 1);
        assert_eq!(c.refused_pops(), 1);

        // the floor does not hold back the host's own unwind
        assert_eq!(c.restore_to(0), 1);
        assert_eq!(c.surface().depth(), 0);
    }

    #[test]
    fn pop_restores_colors_but_not_flags() {
        let (mut c, _) = canvas();
        c.fill_rgb(1.0, 0.0, 0.0);
        c.stroke_weight(2.0);
        c.transform_push();
        c.fill_rgb(0.0, 0.0, 1.0);
        c.stroke_weight(8.0);
        c.no_fill();
        c.transform_pop();
        assert_eq!(c.state().fill, Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(c.state().stroke_weight, 2.0);
        assert!(!c.state().fill_active);
    }

    #[test]
    fn unmatched_pop_is_ignored() {
        let (mut c, log) = canvas();
        c.transform_pop();
        assert_eq!(c.transform_depth(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn restore_to_unwinds_nested_scopes() {
        let (mut c, _) = canvas();
        c.transform_push();
        c.transform_push();
        c.transform_push();
        assert_eq!(c.restore_to(1), 2);
        assert_eq!(c.transform_depth(), 1);
        assert_eq!(c.surface().depth(), 1);
    }

    #[test]
    fn font_is_remembered_and_forwarded() {
        let (mut c, log) = canvas();
        c.font("monospace", 15.0);
        assert_eq!(c.current_font().map(FontSpec::to_css).as_deref(), Some("15px monospace"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let (mut a, _) = canvas();
        let (mut b, _) = canvas();
        for _ in 0..10 {
            assert_eq!(a.random(&[10.0]).unwrap(), b.random(&[10.0]).unwrap());
        }
        a.reseed(99);
        b.reseed(99);
        assert_eq!(a.random_range(-1.0, 1.0), b.random_range(-1.0, 1.0));
    }
}
