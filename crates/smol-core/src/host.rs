//! Canvas host: the composition root.
//!
//! Owns the [`Canvas`] (and through it the surface), the host
//! [`Environment`], the optional callback slots and the frame clock. The
//! platform backend feeds it input events and frame timestamps; the host
//! never schedules anything itself.
//!
//! Every callback runs inside a guard. A callback that returns an error or
//! panics is logged and counted in [`HostStats`]; the frame still closes
//! its transform scope and the loop keeps going.
//!
//! Panic isolation needs unwinding. On `wasm32-unknown-unknown` panics
//! abort, so in the browser only `Err` results are contained and a
//! panicking handler ends the loop.

use crate::config::CanvasConfig;
use crate::draw::Canvas;
use crate::error::{HandlerResult, SketchError};
use crate::input::{self, Dispatch, InputEvent};
use crate::scheduler::{CancelToken, FrameClock, FrameTiming, TickOutcome};
use crate::sketch::Sketch;
use crate::surface::Surface;
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Host viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Window/document services the host needs.
pub trait Environment {
    fn set_title(&mut self, title: &str);
    fn title(&self) -> Option<String>;
    fn viewport(&self) -> Viewport;
    /// Drop the document margin so a full-viewport surface fits exactly.
    fn remove_margin(&mut self);
    /// Seed for the canvas random source when none is configured.
    fn entropy_seed(&self) -> u64;
}

/// Environment with no window behind it.
#[derive(Debug, Clone)]
pub struct HeadlessEnvironment {
    title: Option<String>,
    viewport: Viewport,
    margin_removed: bool,
    seed: u64,
}

impl HeadlessEnvironment {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            title: None,
            viewport: Viewport { width, height },
            margin_removed: false,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn margin_removed(&self) -> bool {
        self.margin_removed
    }
}

impl Default for HeadlessEnvironment {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Environment for HeadlessEnvironment {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn remove_margin(&mut self) {
        self.margin_removed = true;
    }

    fn entropy_seed(&self) -> u64 {
        self.seed
    }
}

pub type UpdateHandler<S> = Box<dyn FnMut(&mut Canvas<S>, f64) -> HandlerResult>;
pub type DrawHandler<S> = Box<dyn FnMut(&mut Canvas<S>) -> HandlerResult>;
pub type MouseHandler<S> = Box<dyn FnMut(&mut Canvas<S>) -> HandlerResult>;
pub type KeyHandler<S> = Box<dyn FnMut(&mut Canvas<S>, &str) -> HandlerResult>;

struct Handlers<S: Surface> {
    update: Option<UpdateHandler<S>>,
    draw: Option<DrawHandler<S>>,
    mouse_pressed: Option<MouseHandler<S>>,
    key_pressed: Option<KeyHandler<S>>,
}

impl<S: Surface> Default for Handlers<S> {
    fn default() -> Self {
        Self {
            update: None,
            draw: None,
            mouse_pressed: None,
            key_pressed: None,
        }
    }
}

/// Counters; failures never stop the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub frames: u64,
    pub failed_updates: u64,
    pub failed_draws: u64,
    pub failed_events: u64,
    /// Frames whose draw left the transform stack unbalanced.
    pub unbalanced_frames: u64,
}

pub struct CanvasHost<S: Surface> {
    canvas: Canvas<S>,
    env: Box<dyn Environment>,
    handlers: Handlers<S>,
    clock: FrameClock,
    cancel: CancelToken,
    stats: HostStats,
}

impl<S: Surface> CanvasHost<S> {
    pub fn new(surface: S, env: impl Environment + 'static) -> Self {
        let seed = env.entropy_seed();
        Self {
            canvas: Canvas::new(surface, seed),
            env: Box::new(env),
            handlers: Handlers::default(),
            clock: FrameClock::default(),
            cancel: CancelToken::new(),
            stats: HostStats::default(),
        }
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<S> {
        &mut self.canvas
    }

    pub fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn mouse_x(&self) -> f64 {
        self.canvas.mouse_x()
    }

    pub fn mouse_y(&self) -> f64 {
        self.canvas.mouse_y()
    }

    pub fn fps(&self) -> f64 {
        self.clock.fps()
    }

    // ─── Lifecycle and configuration ────────────────────────────────────

    pub fn set_title(&mut self, title: &str) {
        self.env.set_title(title);
    }

    /// Run `f` once, synchronously.
    pub fn setup(&mut self, f: impl FnOnce(&mut Self) -> HandlerResult) -> HandlerResult {
        let result = f(self);
        match &result {
            Ok(()) => log::info!("setup complete ({}x{})", self.width(), self.height()),
            Err(e) => log::error!("setup failed: {e}"),
        }
        result
    }

    /// Resize the surface; `height` defaults to `width`.
    pub fn size(&mut self, width: u32, height: Option<u32>) {
        self.canvas.size(width, height);
    }

    /// Size to the whole viewport, removing the document margin.
    pub fn fill_window(&mut self) {
        self.env.remove_margin();
        let vp = self.env.viewport();
        self.canvas.size(vp.width, Some(vp.height));
    }

    pub fn font(&mut self, name: &str, size_px: f64) {
        self.canvas.font(name, size_px);
    }

    pub fn configure(&mut self, config: &CanvasConfig) {
        if let Some(title) = &config.title {
            self.set_title(title);
        }
        if config.fill_window {
            self.fill_window();
        } else {
            self.size(config.width, config.height);
        }
        if let Some(font) = &config.font {
            self.font(&font.name, font.size_px);
        }
        self.clock.set_smoothing(config.smoothing);
        if let Some(seed) = config.seed {
            self.canvas.reseed(seed);
        }
    }

    // ─── Callback slots ─────────────────────────────────────────────────

    pub fn on_update(&mut self, f: impl FnMut(&mut Canvas<S>, f64) -> HandlerResult + 'static) {
        self.handlers.update = Some(Box::new(f));
    }

    pub fn on_draw(&mut self, f: impl FnMut(&mut Canvas<S>) -> HandlerResult + 'static) {
        self.handlers.draw = Some(Box::new(f));
    }

    pub fn on_mouse_pressed(&mut self, f: impl FnMut(&mut Canvas<S>) -> HandlerResult + 'static) {
        self.handlers.mouse_pressed = Some(Box::new(f));
    }

    pub fn on_key_pressed(&mut self, f: impl FnMut(&mut Canvas<S>, &str) -> HandlerResult + 'static) {
        self.handlers.key_pressed = Some(Box::new(f));
    }

    pub fn clear_update(&mut self) {
        self.handlers.update = None;
    }

    pub fn clear_draw(&mut self) {
        self.handlers.draw = None;
    }

    pub fn clear_mouse_pressed(&mut self) {
        self.handlers.mouse_pressed = None;
    }

    pub fn clear_key_pressed(&mut self) {
        self.handlers.key_pressed = None;
    }

    /// Run the sketch's setup, then route every callback slot to it.
    pub fn run_sketch<K>(&mut self, sketch: K) -> HandlerResult
    where
        K: Sketch<S> + 'static,
        S: 'static,
    {
        let sketch = Rc::new(RefCell::new(sketch));
        self.setup(|host| sketch.borrow_mut().setup(host))?;

        let s = Rc::clone(&sketch);
        self.on_update(move |c, dt| s.borrow_mut().update(c, dt));
        let s = Rc::clone(&sketch);
        self.on_draw(move |c| s.borrow_mut().draw(c));
        let s = Rc::clone(&sketch);
        self.on_mouse_pressed(move |c| s.borrow_mut().mouse_pressed(c));
        self.on_key_pressed(move |c, key| sketch.borrow_mut().key_pressed(c, key));
        Ok(())
    }

    // ─── Input ──────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent) {
        let origin = self.canvas.surface().client_origin();
        let canvas = &mut self.canvas;
        let result = match input::translate(&mut canvas.pointer, origin, event) {
            Dispatch::Nothing => return,
            Dispatch::MousePressed => match self.handlers.mouse_pressed.as_mut() {
                Some(h) => guarded(|| h(canvas)),
                None => return,
            },
            Dispatch::KeyPressed(key) => match self.handlers.key_pressed.as_mut() {
                Some(h) => guarded(|| h(canvas, &key)),
                None => return,
            },
        };
        if let Err(e) = result {
            self.stats.failed_events += 1;
            log::error!("input handler failed: {e}");
        }
    }

    // ─── Frame loop ─────────────────────────────────────────────────────

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            log::info!("frame loop stopped after {} frames", self.stats.frames);
        }
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// One frame: timing, `update(dt)`, then `draw()` inside a transform
    /// scope. Returns whether the backend should request another frame.
    pub fn tick(&mut self, timestamp: f64) -> TickOutcome {
        if self.cancel.is_cancelled() {
            return TickOutcome::Stopped;
        }

        let timing = self.clock.advance(timestamp);
        self.canvas.fps = timing.fps;
        self.stats.frames += 1;
        log_timing(self.stats.frames, &timing);

        if let Some(update) = self.handlers.update.as_mut() {
            let canvas = &mut self.canvas;
            if let Err(e) = guarded(|| update(canvas, timing.dt)) {
                self.stats.failed_updates += 1;
                log::error!("update failed on frame {}: {e}", self.stats.frames);
            }
        }

        let base = self.canvas.transform_depth();
        let refused = self.canvas.refused_pops();
        self.canvas.transform_push();
        // draw may not pop the frame's own scope
        self.canvas.set_scope_floor(base + 1);
        if let Some(draw) = self.handlers.draw.as_mut() {
            let canvas = &mut self.canvas;
            if let Err(e) = guarded(|| draw(canvas)) {
                self.stats.failed_draws += 1;
                log::error!("draw failed on frame {}: {e}", self.stats.frames);
            }
        }
        self.canvas.set_scope_floor(base);
        let popped = self.canvas.restore_to(base);
        let extra_pops = self.canvas.refused_pops() - refused;
        if popped != 1 || extra_pops > 0 {
            self.stats.unbalanced_frames += 1;
            log::warn!(
                "draw left the transform stack unbalanced (closed {popped} scopes, \
                 {extra_pops} unmatched pops)"
            );
        }

        if self.cancel.is_cancelled() {
            TickOutcome::Stopped
        } else {
            TickOutcome::Continue
        }
    }

    /// Tick through `timestamps` until exhausted or stopped. Returns the
    /// number of frames run.
    pub fn run_timestamps(&mut self, timestamps: impl IntoIterator<Item = f64>) -> u64 {
        let start = self.stats.frames;
        for ts in timestamps {
            if self.tick(ts) == TickOutcome::Stopped {
                break;
            }
        }
        self.stats.frames - start
    }
}

fn log_timing(frame: u64, timing: &FrameTiming) {
    log::trace!(
        "frame {frame} t={:.1}ms dt={:.4}s fps={:.1}",
        timing.timestamp,
        timing.dt,
        timing.fps
    );
}

/// Run a callback, turning panics into errors.
fn guarded(f: impl FnOnce() -> HandlerResult) -> HandlerResult {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(SketchError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
