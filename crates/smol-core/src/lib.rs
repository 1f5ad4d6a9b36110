//! SmolCanvas engine core.
//!
//! A tiny creative-coding canvas: a frame loop with smoothed fps, input
//! translation into sketch callbacks, a fill/stroke drawing state machine
//! with transform scopes, and a handful of math helpers. Platform backends
//! implement [`Surface`] and [`Environment`] and drive
//! [`CanvasHost::tick`] from their frame-presentation mechanism.

pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod host;
pub mod input;
pub mod math;
pub mod recording;
pub mod scheduler;
pub mod sketch;
pub mod surface;
pub mod vector;

pub use color::Rgba;
pub use config::CanvasConfig;
pub use draw::{Canvas, DrawState};
pub use error::{HandlerResult, SketchError};
pub use host::{CanvasHost, Environment, HeadlessEnvironment, HostStats, Viewport};
pub use input::{InputEvent, Pointer, TouchPoint};
pub use math::{map, random, random_range, shuffle};
pub use recording::{CommandLog, DrawCommand, RecordingSurface};
pub use scheduler::{CancelToken, FrameClock, FrameTiming, TickOutcome};
pub use sketch::Sketch;
pub use surface::{FontSpec, Surface};
pub use vector::Vector;
