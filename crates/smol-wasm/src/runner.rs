//! Drives a `CanvasHost` from the browser.
//!
//! DOM listeners on the canvas feed `handle_input`; a self-rescheduling
//! `requestAnimationFrame` callback feeds `tick`. The callback only asks
//! for another frame while the host's cancel token is clear.

use crate::surface::{WebSurface, js_error};
use smallvec::SmallVec;
use smol_core::{CancelToken, CanvasHost, InputEvent, SketchError, TickOutcome, TouchPoint};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent, Window};

pub type WebHost = CanvasHost<WebSurface>;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A DOM listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

pub struct RunHandle {
    host: Rc<RefCell<WebHost>>,
    cancel: CancelToken,
    window: Window,
    frame: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
}

impl RunHandle {
    /// Attach listeners to the host's canvas and start the frame loop.
    pub fn start(host: WebHost) -> Result<Self, SketchError> {
        let window =
            web_sys::window().ok_or_else(|| SketchError::Surface("no global window".to_string()))?;
        let canvas = host.canvas().surface().canvas().clone();
        // focusable, so keyup reaches it
        canvas.set_tab_index(1);

        let cancel = host.cancel_token();
        let host = Rc::new(RefCell::new(host));
        let target: EventTarget = canvas.into();

        let listeners = vec![
            listen(&target, "pointermove", &host, |event| {
                let e = event.dyn_ref::<MouseEvent>()?;
                Some(InputEvent::PointerMove {
                    x: f64::from(e.x()),
                    y: f64::from(e.y()),
                })
            })?,
            listen(&target, "touchmove", &host, |event| {
                let e = event.dyn_ref::<TouchEvent>()?;
                let list = e.touches();
                let touches: SmallVec<[TouchPoint; 2]> = (0..list.length())
                    .filter_map(|i| list.get(i))
                    .map(|t| TouchPoint {
                        client_x: f64::from(t.client_x()),
                        client_y: f64::from(t.client_y()),
                    })
                    .collect();
                Some(InputEvent::TouchMove { touches })
            })?,
            listen(&target, "pointerdown", &host, |event| {
                let e = event.dyn_ref::<MouseEvent>()?;
                Some(InputEvent::PointerDown {
                    x: f64::from(e.x()),
                    y: f64::from(e.y()),
                })
            })?,
            listen(&target, "keyup", &host, |event| {
                let e = event.dyn_ref::<KeyboardEvent>()?;
                Some(InputEvent::key_up(e.key()))
            })?,
        ];

        let handle = Self {
            host,
            cancel,
            window,
            frame: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
            listeners,
        };
        handle.install_frame_callback();
        request_frame(&handle.window, &handle.frame, &handle.pending)?;
        log::info!("frame loop started");
        Ok(handle)
    }

    pub fn host(&self) -> &Rc<RefCell<WebHost>> {
        &self.host
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Stop the loop, cancel any pending frame and detach listeners.
    pub fn stop(&mut self) {
        if let Ok(host) = self.host.try_borrow() {
            host.stop();
        } else {
            self.cancel.cancel();
        }
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // breaks the closure -> slot cycle
        self.frame.borrow_mut().take();
        self.listeners.clear();
    }

    fn install_frame_callback(&self) {
        let host = Rc::clone(&self.host);
        let window = self.window.clone();
        let slot = Rc::clone(&self.frame);
        let pending = Rc::clone(&self.pending);

        let cb = Closure::wrap(Box::new(move |timestamp: f64| {
            pending.set(None);
            let outcome = match host.try_borrow_mut() {
                Ok(mut host) => host.tick(timestamp),
                Err(_) => {
                    log::warn!("host busy, skipping frame at {timestamp:.1}ms");
                    TickOutcome::Continue
                }
            };
            match outcome {
                TickOutcome::Continue => {
                    if let Err(e) = request_frame(&window, &slot, &pending) {
                        log::error!("could not request next frame: {e}");
                    }
                }
                TickOutcome::Stopped => log::info!("frame loop halted"),
            }
        }) as Box<dyn FnMut(f64)>);

        *self.frame.borrow_mut() = Some(cb);
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(
    window: &Window,
    slot: &FrameSlot,
    pending: &Rc<Cell<Option<i32>>>,
) -> Result<(), SketchError> {
    let slot = slot.borrow();
    let Some(cb) = slot.as_ref() else {
        return Ok(());
    };
    let id = window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(js_error)?;
    pending.set(Some(id));
    Ok(())
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    host: &Rc<RefCell<WebHost>>,
    convert: impl Fn(&Event) -> Option<InputEvent> + 'static,
) -> Result<Listener, SketchError> {
    let host = Rc::clone(host);
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(input) = convert(&event) else {
            return;
        };
        match host.try_borrow_mut() {
            Ok(mut host) => host.handle_input(input),
            Err(_) => log::warn!("host busy, dropped {kind} event"),
        }
    }) as Box<dyn FnMut(Event)>);

    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}
