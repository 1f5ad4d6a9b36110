//! Range mapping, random sampling and shuffling.
//!
//! Everything random is generic over [`rand::Rng`]; the engine owns a single
//! seeded source on [`Canvas`](crate::draw::Canvas) and sketches normally go
//! through that.

use crate::error::SketchError;
use rand::Rng;

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Not clamped. A zero-width input range (`in_min == in_max`) yields a
/// non-finite result.
pub fn map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (out_max - out_min) * (value - in_min) / (in_max - in_min)
}

/// Uniform sample in `[min, max)`.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    map(rng.random::<f64>(), 0.0, 1.0, min, max)
}

/// Arity-dependent sampling:
///
/// | args     | range      |
/// |----------|------------|
/// | `[]`     | `[0, 1)`   |
/// | `[n]`    | `[0, n)`   |
/// | `[a, b]` | `[a, b)`   |
pub fn random<R: Rng + ?Sized>(rng: &mut R, args: &[f64]) -> Result<f64, SketchError> {
    match *args {
        [] => Ok(random_range(rng, 0.0, 1.0)),
        [n] => Ok(random_range(rng, 0.0, n)),
        [a, b] => Ok(random_range(rng, a, b)),
        _ => Err(SketchError::InvalidArity(args.len())),
    }
}

/// In-place Fisher–Yates shuffle. Returns the same slice.
pub fn shuffle<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a mut [T]) -> &'a mut [T] {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
    items
}
