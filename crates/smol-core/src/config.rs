//! Declarative canvas configuration.
//!
//! Same knobs as the imperative setup calls, loadable from JSON:
//!
//! ```json
//! { "title": "Particles", "fill_window": true, "font": { "name": "monospace", "size_px": 20 } }
//! ```

use crate::error::SketchError;
use crate::scheduler::DEFAULT_SMOOTHING;
use crate::surface::FontSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub title: Option<String>,
    pub width: u32,
    /// Defaults to `width`.
    pub height: Option<u32>,
    /// Size to the host viewport; overrides `width`/`height`.
    pub fill_window: bool,
    pub font: Option<FontSpec>,
    /// EMA factor for the fps reading.
    pub smoothing: f64,
    /// Fixed random seed. `None` asks the environment for entropy.
    pub seed: Option<u64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 400,
            height: None,
            fill_window: false,
            font: None,
            smoothing: DEFAULT_SMOOTHING,
            seed: None,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(text: &str) -> Result<Self, SketchError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn resolved_height(&self) -> u32 {
        self.height.unwrap_or(self.width)
    }
}
