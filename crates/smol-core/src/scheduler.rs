//! Frame timing and loop cancellation.
//!
//! [`FrameClock`] turns host timestamps (milliseconds) into a per-frame
//! `dt` in seconds and an exponentially smoothed frame rate. The loop
//! itself lives in [`CanvasHost::tick`](crate::host::CanvasHost::tick);
//! the backend reschedules only while the [`CancelToken`] is clear.

use std::cell::Cell;
use std::rc::Rc;

/// Default EMA factor applied to the previous fps reading.
pub const DEFAULT_SMOOTHING: f64 = 0.9;

/// Timing for one tick. Not stored past the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    pub timestamp: f64,
    /// Seconds since the previous tick; `0.0` on the first.
    pub dt: f64,
    /// `1 / dt` when `dt > 0`.
    pub instant_fps: Option<f64>,
    /// Smoothed fps after this tick.
    pub fps: f64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    fps: f64,
    smoothing: f64,
}

impl FrameClock {
    pub fn new(smoothing: f64) -> Self {
        Self {
            last_timestamp: None,
            fps: 0.0,
            smoothing,
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.smoothing = smoothing;
    }

    /// Advance to `timestamp` (ms).
    pub fn advance(&mut self, timestamp: f64) -> FrameTiming {
        let dt = match self.last_timestamp {
            Some(last) => (timestamp - last) / 1000.0,
            None => 0.0,
        };
        let instant_fps = (dt > 0.0).then(|| 1.0 / dt);
        if let Some(sample) = instant_fps {
            self.fps = self.fps * self.smoothing + sample * (1.0 - self.smoothing);
        }
        self.last_timestamp = Some(timestamp);
        FrameTiming {
            timestamp,
            dt,
            instant_fps,
            fps: self.fps,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What the backend should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Request another frame.
    Continue,
    /// Cancelled; do not reschedule.
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_dt_and_keeps_fps() {
        let mut clock = FrameClock::default();
        let t = clock.advance(1234.0);
        assert_eq!(t.dt, 0.0);
        assert_eq!(t.instant_fps, None);
        assert_eq!(t.fps, 0.0);
        assert_eq!(clock.last_timestamp(), Some(1234.0));
    }

    #[test]
    fn second_tick_smooths_toward_instant_fps() {
        let mut clock = FrameClock::default();
        clock.advance(1000.0);
        let t = clock.advance(1016.0);
        assert!((t.dt - 0.016).abs() < 1e-12);
        assert!((t.instant_fps.unwrap() - 62.5).abs() < 1e-9);
        assert!((t.fps - 6.25).abs() < 1e-9, "fps = {}", t.fps);
    }

    #[test]
    fn fps_converges_on_steady_rate() {
        let mut clock = FrameClock::default();
        for i in 0..400 {
            clock.advance(f64::from(i) * 20.0);
        }
        assert!((clock.fps() - 50.0).abs() < 0.01, "fps = {}", clock.fps());
    }

    #[test]
    fn zero_timestamp_counts_as_a_prior_frame() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        let t = clock.advance(16.0);
        assert!(t.dt > 0.0);
    }

    #[test]
    fn repeated_timestamp_leaves_fps_alone() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        clock.advance(16.0);
        let before = clock.fps();
        let t = clock.advance(16.0);
        assert_eq!(t.dt, 0.0);
        assert_eq!(clock.fps(), before);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
