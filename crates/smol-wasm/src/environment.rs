//! `Environment` over the browser window and document.

use crate::surface::js_error;
use smol_core::{Environment, SketchError, Viewport};
use web_sys::{Document, Window};

pub struct WebEnvironment {
    window: Window,
    document: Document,
}

impl WebEnvironment {
    pub fn new() -> Result<Self, SketchError> {
        let window =
            web_sys::window().ok_or_else(|| SketchError::Surface("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| SketchError::Surface("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Environment for WebEnvironment {
    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn title(&self) -> Option<String> {
        Some(self.document.title())
    }

    fn viewport(&self) -> Viewport {
        match self.document.body() {
            Some(body) => Viewport {
                width: clamp_dimension(body.client_width()),
                height: clamp_dimension(body.client_height()),
            },
            None => Viewport { width: 0, height: 0 },
        }
    }

    fn remove_margin(&mut self) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(e) = body.style().set_property("margin", "0").map_err(js_error) {
            log::warn!("could not clear body margin: {e}");
        }
    }

    fn entropy_seed(&self) -> u64 {
        seed_from_samples(js_sys::Math::random(), js_sys::Math::random())
    }
}

fn clamp_dimension(px: i32) -> u32 {
    u32::try_from(px).unwrap_or(0)
}

/// Fold two `[0, 1)` samples into 64 seed bits.
pub(crate) fn seed_from_samples(hi: f64, lo: f64) -> u64 {
    let bits = |v: f64| (v * f64::from(u32::MAX)) as u64 & 0xFFFF_FFFF;
    (bits(hi) << 32) | bits(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_packs_both_halves() {
        assert_eq!(seed_from_samples(0.0, 0.0), 0);
        let s = seed_from_samples(0.5, 0.25);
        assert_eq!(s >> 32, (0.5 * f64::from(u32::MAX)) as u64);
        assert_eq!(s & 0xFFFF_FFFF, (0.25 * f64::from(u32::MAX)) as u64);
    }

    #[test]
    fn negative_client_sizes_clamp_to_zero() {
        assert_eq!(clamp_dimension(-3), 0);
        assert_eq!(clamp_dimension(640), 640);
    }
}
