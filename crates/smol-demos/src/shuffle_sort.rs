//! "Stupid sort": random compare-and-swap steps slowly order a shuffled
//! bar chart. Clicking reshuffles.

use smol_core::{Canvas, CanvasHost, HandlerResult, Sketch, Surface, map};

pub const VALUE_COUNT: usize = 700;

#[derive(Debug, Default)]
pub struct ShuffleSort {
    values: Vec<usize>,
}

impl ShuffleSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Pairs `(i, j)` with `j < i` that are still out of (descending) order.
    pub fn inversions(&self) -> usize {
        let v = &self.values;
        (0..v.len())
            .map(|i| (0..i).filter(|&j| v[i] > v[j]).count())
            .sum()
    }
}

impl<S: Surface> Sketch<S> for ShuffleSort {
    fn setup(&mut self, host: &mut CanvasHost<S>) -> HandlerResult {
        host.fill_window();
        host.font("monospace", 20.0);
        self.values = (0..VALUE_COUNT).collect();
        host.canvas_mut().shuffle(&mut self.values);
        Ok(())
    }

    fn mouse_pressed(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        canvas.shuffle(&mut self.values);
        Ok(())
    }

    fn update(&mut self, c: &mut Canvas<S>, _dt: f64) -> HandlerResult {
        let len = self.values.len();
        for _ in 0..len.div_ceil(4) {
            let i = c.random(&[len as f64])?.floor() as usize;
            let j = c.random(&[i as f64])?.floor() as usize;
            if self.values[i] > self.values[j] {
                self.values.swap(i, j);
            }
        }
        Ok(())
    }

    fn draw(&mut self, c: &mut Canvas<S>) -> HandlerResult {
        let (w, h) = (f64::from(c.width()), f64::from(c.height()));
        let len = self.values.len() as f64;
        c.background(0.0);
        c.fill_rgb(1.0, 1.0, 1.0);
        c.stroke_rgb(1.0, 1.0, 1.0);
        let each = w / len;
        for (i, &v) in self.values.iter().enumerate() {
            c.rect(each * i as f64, 0.0, each + 1.0, map(v as f64, 0.0, len, 0.0, h));
        }
        c.fill_alpha(0.0, 0.5);
        c.rect(10.0, 10.0, 100.0, 20.0);
        c.fill_rgb(1.0, 1.0, 1.0);
        let fps = format!("FPS: {}", c.fps().round());
        c.text(10.0, 10.0, &fps);
        Ok(())
    }
}
