//! Unit-range RGBA colors.

use crate::math::map;
use serde::{Deserialize, Serialize};

/// A color with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    pub const fn gray_alpha(value: f64, a: f64) -> Self {
        Self::rgba(value, value, value, a)
    }

    /// CSS `rgba(R,G,B,a)` string; color channels mapped onto `[0, 255]`,
    /// alpha left in unit range.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            to_channel(self.r),
            to_channel(self.g),
            to_channel(self.b),
            self.a
        )
    }

    /// 8-bit channels, clamped.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f64| to_channel(v).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

fn to_channel(v: f64) -> f64 {
    map(v, 0.0, 1.0, 0.0, 255.0)
}
