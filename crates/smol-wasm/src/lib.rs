//! Browser backend for SmolCanvas.
//!
//! Compiled via `wasm-pack build --target web`. JavaScript calls
//! `startDemo(name, canvas?, configJson?)` and keeps the returned handle;
//! dropping or stopping it ends the frame loop.

mod environment;
mod runner;
mod surface;

pub use environment::WebEnvironment;
pub use runner::{RunHandle, WebHost};
pub use surface::WebSurface;

use smol_core::{CanvasConfig, CanvasHost, SketchError};
use smol_demos::DemoKind;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// A running demo, as seen from JavaScript.
#[wasm_bindgen]
pub struct DemoHandle {
    run: RunHandle,
}

#[wasm_bindgen]
impl DemoHandle {
    pub fn stop(&mut self) {
        self.run.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    pub fn fps(&self) -> f64 {
        self.run.host().try_borrow().map(|h| h.fps()).unwrap_or(0.0)
    }

    /// Frames ticked so far (u64 would surface as a BigInt).
    pub fn frames(&self) -> f64 {
        self.run
            .host()
            .try_borrow()
            .map(|h| h.stats().frames as f64)
            .unwrap_or(0.0)
    }
}

/// Names accepted by `startDemo`.
#[wasm_bindgen(js_name = demoNames)]
pub fn demo_names() -> Vec<JsValue> {
    DemoKind::ALL
        .into_iter()
        .map(|d| JsValue::from_str(d.name()))
        .collect()
}

/// Start a demo on `canvas`, or on a new canvas appended to `<body>`.
#[wasm_bindgen(js_name = startDemo)]
pub fn start_demo(
    name: &str,
    canvas: Option<HtmlCanvasElement>,
    config_json: Option<String>,
) -> Result<DemoHandle, JsValue> {
    console_error_panic_hook_setup();
    init_logging();
    start(name, canvas, config_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn start(
    name: &str,
    canvas: Option<HtmlCanvasElement>,
    config_json: Option<&str>,
) -> Result<DemoHandle, SketchError> {
    let demo = DemoKind::from_name(name)
        .ok_or_else(|| SketchError::handler(format!("unknown demo `{name}`")))?;
    let env = WebEnvironment::new()?;
    let surface = match canvas {
        Some(canvas) => WebSurface::new(canvas)?,
        None => WebSurface::create_in_body(env.document())?,
    };

    let mut host = CanvasHost::new(surface, env);
    if let Some(json) = config_json {
        host.configure(&CanvasConfig::from_json(json)?);
    }
    demo.install(&mut host)?;
    let run = RunHandle::start(host)?;
    Ok(DemoHandle { run })
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"logger already installed".into());
            }
        });
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("SmolCanvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
