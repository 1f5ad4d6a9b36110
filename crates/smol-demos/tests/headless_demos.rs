//! Integration tests: run each demo headlessly against the recording
//! surface and check the observable behavior of the sketch contract.

use pretty_assertions::assert_eq;
use smol_core::{
    CanvasHost, DrawCommand, HeadlessEnvironment, InputEvent, RecordingSurface, Sketch,
    SketchError,
};
use smol_demos::particles::PARTICLE_COUNT;
use smol_demos::shuffle_sort::VALUE_COUNT;
use smol_demos::{DemoKind, Hello, Particles, ShuffleSort};
use std::cell::RefCell;
use std::rc::Rc;

fn host() -> CanvasHost<RecordingSurface> {
    CanvasHost::new(
        RecordingSurface::new(300, 150),
        HeadlessEnvironment::new(640, 480).with_seed(11),
    )
}

fn frames(n: u32) -> impl Iterator<Item = f64> {
    (0..n).map(|i| f64::from(i) * 16.0)
}

/// Keeps a handle on the sketch so tests can inspect its state.
struct Shared<K>(Rc<RefCell<K>>);

impl<S: smol_core::Surface, K: Sketch<S>> Sketch<S> for Shared<K> {
    fn setup(&mut self, host: &mut CanvasHost<S>) -> Result<(), SketchError> {
        self.0.borrow_mut().setup(host)
    }
    fn update(&mut self, c: &mut smol_core::Canvas<S>, dt: f64) -> Result<(), SketchError> {
        self.0.borrow_mut().update(c, dt)
    }
    fn draw(&mut self, c: &mut smol_core::Canvas<S>) -> Result<(), SketchError> {
        self.0.borrow_mut().draw(c)
    }
    fn mouse_pressed(&mut self, c: &mut smol_core::Canvas<S>) -> Result<(), SketchError> {
        self.0.borrow_mut().mouse_pressed(c)
    }
}

fn install<K: Sketch<RecordingSurface> + 'static>(
    host: &mut CanvasHost<RecordingSurface>,
    sketch: K,
) -> Rc<RefCell<K>> {
    let shared = Rc::new(RefCell::new(sketch));
    host.run_sketch(Shared(Rc::clone(&shared))).unwrap();
    shared
}

// ─── hello ──────────────────────────────────────────────────────────────

#[test]
fn hello_configures_title_size_and_font() {
    let mut host = host();
    let hello = install(&mut host, Hello::new());
    assert_eq!(host.environment().title().as_deref(), Some("Hello world"));
    assert_eq!((host.width(), host.height()), (500, 500));
    assert_eq!(hello.borrow().line_y(), 250.0);
}

#[test]
fn hello_click_moves_line_up_and_wraps() {
    let mut host = host();
    let hello = install(&mut host, Hello::new());
    for _ in 0..6 {
        host.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    }
    assert_eq!(hello.borrow().line_y(), 10.0);
    host.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    assert_eq!(hello.borrow().line_y(), 500.0);
}

#[test]
fn hello_rotates_ninety_degrees_per_second() {
    let mut host = host();
    let hello = install(&mut host, Hello::new());
    host.run_timestamps([0.0, 500.0]);
    assert!((hello.borrow().angle() - 45.0).abs() < 1e-9);
}

// ─── particles ──────────────────────────────────────────────────────────

#[test]
fn particles_fill_window_and_stay_alive_after_update() {
    let mut host = host();
    let sketch = install(&mut host, Particles::new());
    assert_eq!((host.width(), host.height()), (640, 480));

    host.handle_input(InputEvent::PointerMove { x: 320.0, y: 240.0 });
    host.run_timestamps(frames(120));

    let sketch = sketch.borrow();
    assert_eq!(sketch.particles().len(), PARTICLE_COUNT);
    for p in sketch.particles() {
        assert!(!p.is_dead(640.0, 480.0), "dead particle survived update: {p:?}");
    }
    assert_eq!(host.stats().failed_updates, 0);
}

#[test]
fn particles_draw_one_arc_each() {
    let surface = RecordingSurface::new(100, 100);
    let log = surface.log();
    let mut host = CanvasHost::new(surface, HeadlessEnvironment::new(400, 300));
    DemoKind::Particles.install(&mut host).unwrap();
    log.take();

    host.tick(0.0);
    assert_eq!(
        log.count(|c| matches!(c, DrawCommand::Arc { .. })),
        PARTICLE_COUNT
    );
}

// ─── shuffle-sort ───────────────────────────────────────────────────────

#[test]
fn shuffle_sort_keeps_a_permutation_and_reduces_inversions() {
    let mut host = host();
    let sketch = install(&mut host, ShuffleSort::new());
    let before = sketch.borrow().inversions();
    assert!(before > 0);

    host.run_timestamps(frames(200));

    let s = sketch.borrow();
    let mut sorted = s.values().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..VALUE_COUNT).collect::<Vec<_>>());
    assert!(s.inversions() < before, "{} >= {before}", s.inversions());
}

#[test]
fn shuffle_sort_click_reshuffles() {
    let mut host = host();
    let sketch = install(&mut host, ShuffleSort::new());
    host.run_timestamps(frames(50));
    let before = sketch.borrow().values().to_vec();
    host.handle_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
    assert_ne!(sketch.borrow().values(), before.as_slice());
}

#[test]
fn shuffle_sort_draws_a_bar_per_value() {
    let surface = RecordingSurface::new(100, 100);
    let log = surface.log();
    let mut host = CanvasHost::new(surface, HeadlessEnvironment::new(700, 400));
    DemoKind::ShuffleSort.install(&mut host).unwrap();
    log.take();

    host.tick(0.0);
    // background + bars + fps box
    assert_eq!(
        log.count(|c| matches!(c, DrawCommand::FillRect { .. })),
        VALUE_COUNT + 2
    );
}

// ─── all demos ──────────────────────────────────────────────────────────

#[test]
fn every_demo_runs_without_failures() {
    for demo in DemoKind::ALL {
        let mut host = host();
        demo.install(&mut host).unwrap();
        host.handle_input(InputEvent::key_up("a"));
        host.handle_input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        assert_eq!(host.run_timestamps(frames(30)), 30, "{demo}");
        let stats = host.stats();
        assert_eq!(stats.failed_updates + stats.failed_draws + stats.failed_events, 0, "{demo}");
        assert_eq!(stats.unbalanced_frames, 0, "{demo}");
    }
}
