//! Demo sketches for SmolCanvas.
//!
//! Each demo is an ordinary [`Sketch`] and runs on any surface. Both the
//! browser entry point and the headless runner pick them by name.

pub mod hello;
pub mod particles;
pub mod shuffle_sort;

pub use hello::Hello;
pub use particles::Particles;
pub use shuffle_sort::ShuffleSort;

use smol_core::{CanvasHost, HandlerResult, Sketch, Surface};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Hello,
    Particles,
    ShuffleSort,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Hello, DemoKind::Particles, DemoKind::ShuffleSort];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Hello => "hello",
            DemoKind::Particles => "particles",
            DemoKind::ShuffleSort => "shuffle-sort",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// A fresh boxed instance of this demo.
    pub fn build<S: Surface + 'static>(self) -> Box<dyn Sketch<S>> {
        match self {
            DemoKind::Hello => Box::new(Hello::new()),
            DemoKind::Particles => Box::new(Particles::new()),
            DemoKind::ShuffleSort => Box::new(ShuffleSort::new()),
        }
    }

    /// Build the demo and install it on `host`.
    pub fn install<S: Surface + 'static>(self, host: &mut CanvasHost<S>) -> HandlerResult {
        log::info!("starting demo `{}`", self.name());
        host.run_sketch(self.build::<S>())
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for demo in DemoKind::ALL {
            assert_eq!(DemoKind::from_name(demo.name()), Some(demo));
        }
        assert_eq!(DemoKind::from_name("nope"), None);
    }
}
