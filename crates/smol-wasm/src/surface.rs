//! `Surface` over an HTML `<canvas>` 2D context.

use smol_core::{FontSpec, Rgba, SketchError, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Wrap an existing canvas. The context is opaque (`alpha: false`).
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SketchError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::FALSE)
            .map_err(js_error)?;
        let ctx = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(js_error)?
            .ok_or_else(|| SketchError::Surface("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SketchError::Surface("context is not a CanvasRenderingContext2d".to_string()))?;
        Ok(Self { canvas, ctx })
    }

    /// Create a fresh canvas and append it to `<body>`.
    pub fn create_in_body(document: &Document) -> Result<Self, SketchError> {
        let canvas = document
            .create_element("canvas")
            .map_err(js_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SketchError::Surface("created element is not a canvas".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| SketchError::Surface("document has no body".to_string()))?;
        body.append_child(&canvas).map_err(js_error)?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for WebSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn client_origin(&self) -> (f64, f64) {
        let rect = self.canvas.get_bounding_client_rect();
        (rect.left(), rect.top())
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_baseline("hanging");
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, counter_clockwise: bool) {
        warn_on_error(
            "arc",
            self.ctx
                .arc_with_anticlockwise(x, y, radius, start, end, counter_clockwise),
        );
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        warn_on_error("fill_text", self.ctx.fill_text(text, x, y));
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        warn_on_error("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        warn_on_error("rotate", self.ctx.rotate(radians));
    }

    fn scale(&mut self, x: f64, y: f64) {
        warn_on_error("scale", self.ctx.scale(x, y));
    }
}

pub(crate) fn js_error(value: JsValue) -> SketchError {
    SketchError::Surface(format!("{value:?}"))
}

fn warn_on_error(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("canvas {op} failed: {e:?}");
    }
}
