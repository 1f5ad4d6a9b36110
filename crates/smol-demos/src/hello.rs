//! Rotating shapes, an fps readout, and a line that climbs on click.

use smol_core::{Canvas, CanvasHost, HandlerResult, Sketch, Surface};

#[derive(Debug, Default)]
pub struct Hello {
    angle: f64,
    dist: f64,
    line_y: f64,
}

impl Hello {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn line_y(&self) -> f64 {
        self.line_y
    }
}

impl<S: Surface> Sketch<S> for Hello {
    fn setup(&mut self, host: &mut CanvasHost<S>) -> HandlerResult {
        host.set_title("Hello world");
        host.size(500, None);
        host.font("monospace", 15.0);
        self.line_y = f64::from(host.height()) / 2.0;
        Ok(())
    }

    fn update(&mut self, _canvas: &mut Canvas<S>, dt: f64) -> HandlerResult {
        self.angle = (self.angle + 90.0 * dt) % 360.0;
        self.dist = (self.dist + 15.0 * dt) % 150.0;
        Ok(())
    }

    fn mouse_pressed(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        self.line_y -= 40.0;
        if self.line_y < 0.0 {
            self.line_y = f64::from(canvas.height());
        }
        Ok(())
    }

    fn key_pressed(&mut self, _canvas: &mut Canvas<S>, key: &str) -> HandlerResult {
        log::info!("key released: {key}");
        Ok(())
    }

    fn draw(&mut self, c: &mut Canvas<S>) -> HandlerResult {
        let (w, h) = (f64::from(c.width()), f64::from(c.height()));
        c.background(0.0);
        c.fill_rgb(1.0, 1.0, 1.0);
        let fps = format!("FPS: {}", c.fps().round());
        c.text(10.0, 10.0, &fps);
        c.stroke_rgb(1.0, 1.0, 1.0);
        c.line(0.0, self.line_y, w, self.line_y);

        c.translate(w / 2.0, h / 2.0);
        c.fill_rgb(0.8, 0.2, 0.2);
        c.rect(-25.0, -25.0, 50.0, 50.0);
        c.rotate(self.angle);
        c.translate(self.dist, self.dist);
        c.fill_rgb(1.0, 1.0, 1.0);
        c.circle(-15.0, -15.0, 30.0);
        Ok(())
    }
}
