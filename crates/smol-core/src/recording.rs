//! In-memory surface that records every call.
//!
//! Used by the headless runner and by tests. Commands go into a shared
//! [`CommandLog`] so the log stays readable after the surface has been
//! moved into a host. The current transform is tracked with `kurbo::Affine`
//! using canvas composition order (new ops apply in local space).

use crate::color::Rgba;
use crate::surface::{FontSpec, Surface};
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    SetFillColor { color: Rgba },
    SetStrokeColor { color: Rgba },
    SetLineWidth { width: f64 },
    SetFont { font: FontSpec },
    BeginPath,
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64, ccw: bool },
    Fill,
    Stroke,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    FillText { text: String, x: f64, y: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    Scale { x: f64, y: f64 },
}

/// Shared handle onto a recording surface's command list.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<DrawCommand>>>);

impl CommandLog {
    pub fn commands(&self) -> Ref<'_, Vec<DrawCommand>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, cmd: DrawCommand) {
        self.0.borrow_mut().push(cmd);
    }
}

#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    origin: (f64, f64),
    transform: Affine,
    stack: Vec<Affine>,
    max_depth: usize,
    log: CommandLog,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin: (0.0, 0.0),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            max_depth: 0,
            log: CommandLog::default(),
        }
    }

    /// Pretend the surface sits at `(left, top)` in client space.
    pub fn with_client_origin(mut self, left: f64, top: f64) -> Self {
        self.origin = (left, top);
        self
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Map a local point through the current transform.
    pub fn to_device(&self, x: f64, y: f64) -> Point {
        self.transform * Point::new(x, y)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest save nesting seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.log.push(DrawCommand::Resize { width, height });
    }

    fn client_origin(&self) -> (f64, f64) {
        self.origin
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.log.push(DrawCommand::SetFillColor { color });
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.log.push(DrawCommand::SetStrokeColor { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.log.push(DrawCommand::SetLineWidth { width });
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.log.push(DrawCommand::SetFont { font: font.clone() });
    }

    fn begin_path(&mut self) {
        self.log.push(DrawCommand::BeginPath);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.log.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, counter_clockwise: bool) {
        self.log.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start,
            end,
            ccw: counter_clockwise,
        });
    }

    fn fill(&mut self) {
        self.log.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.log.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.log.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.max_depth = self.max_depth.max(self.stack.len());
        self.log.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.log.push(DrawCommand::Restore);
        match self.stack.pop() {
            Some(t) => self.transform = t,
            // canvas ignores a restore with nothing saved
            None => log::debug!("restore on empty save stack ignored"),
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform * Affine::translate((x, y));
        self.log.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self.transform * Affine::rotate(radians);
        self.log.push(DrawCommand::Rotate { radians });
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(x, y);
        self.log.push(DrawCommand::Scale { x, y });
    }
}
