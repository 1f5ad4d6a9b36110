//! Input translation.
//!
//! Raw host events are normalized into [`InputEvent`] by the backend, then
//! [`translate`] folds them into the shared pointer state and says which
//! sketch handler (if any) should run.
//!
//! Pointer-move coordinates are taken as-is (client space). Touch-move
//! coordinates are made canvas-local by subtracting the surface's on-screen
//! origin.

use smallvec::SmallVec;

/// Last known pointer position, read by sketches as `mouse_x`/`mouse_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// One active touch, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    /// Active touches, first one is primary.
    TouchMove { touches: SmallVec<[TouchPoint; 2]> },
    KeyUp { key: String },
}

impl InputEvent {
    pub fn touch(client_x: f64, client_y: f64) -> Self {
        let mut touches = SmallVec::new();
        touches.push(TouchPoint { client_x, client_y });
        Self::TouchMove { touches }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }
}

/// Which sketch handler an event triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Nothing,
    MousePressed,
    KeyPressed(String),
}

/// Apply `event` to `pointer`. `origin` is the surface's client-space
/// top-left, used for touch events only.
pub fn translate(pointer: &mut Pointer, origin: (f64, f64), event: InputEvent) -> Dispatch {
    match event {
        InputEvent::PointerMove { x, y } => {
            pointer.x = x;
            pointer.y = y;
            Dispatch::Nothing
        }
        InputEvent::TouchMove { touches } => {
            match touches.first() {
                Some(touch) => {
                    pointer.x = touch.client_x - origin.0;
                    pointer.y = touch.client_y - origin.1;
                }
                None => log::debug!("touchmove without active touches"),
            }
            Dispatch::Nothing
        }
        // Press handlers take no coordinates; they read the pointer.
        InputEvent::PointerDown { .. } => Dispatch::MousePressed,
        InputEvent::KeyUp { key } => Dispatch::KeyPressed(key),
    }
}
