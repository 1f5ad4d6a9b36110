//! Sketch trait: bundle all callbacks plus their state in one type.
//!
//! Every method has a no-op default, so a sketch only overrides what it
//! uses. Register with [`CanvasHost::run_sketch`](crate::host::CanvasHost::run_sketch).

use crate::draw::Canvas;
use crate::error::HandlerResult;
use crate::host::CanvasHost;
use crate::surface::Surface;

pub trait Sketch<S: Surface> {
    /// Runs once, before the first frame.
    fn setup(&mut self, host: &mut CanvasHost<S>) -> HandlerResult {
        let _ = host;
        Ok(())
    }

    /// Called every frame with the elapsed seconds.
    fn update(&mut self, canvas: &mut Canvas<S>, dt: f64) -> HandlerResult {
        let _ = (canvas, dt);
        Ok(())
    }

    /// Called every frame inside a fresh transform scope.
    fn draw(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        let _ = canvas;
        Ok(())
    }

    fn mouse_pressed(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        let _ = canvas;
        Ok(())
    }

    fn key_pressed(&mut self, canvas: &mut Canvas<S>, key: &str) -> HandlerResult {
        let _ = (canvas, key);
        Ok(())
    }
}

impl<S: Surface, K: Sketch<S> + ?Sized> Sketch<S> for Box<K> {
    fn setup(&mut self, host: &mut CanvasHost<S>) -> HandlerResult {
        (**self).setup(host)
    }

    fn update(&mut self, canvas: &mut Canvas<S>, dt: f64) -> HandlerResult {
        (**self).update(canvas, dt)
    }

    fn draw(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        (**self).draw(canvas)
    }

    fn mouse_pressed(&mut self, canvas: &mut Canvas<S>) -> HandlerResult {
        (**self).mouse_pressed(canvas)
    }

    fn key_pressed(&mut self, canvas: &mut Canvas<S>, key: &str) -> HandlerResult {
        (**self).key_pressed(canvas, key)
    }
}
