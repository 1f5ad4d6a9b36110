//! Engine error type.
//!
//! Programming errors (dimension mismatch, bad arity) and sketch callback
//! failures share one enum so sketches can propagate everything with `?`.

/// Result type returned by sketch callbacks.
pub type HandlerResult = Result<(), SketchError>;

#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("random() takes 0, 1 or 2 arguments, got {0}")]
    InvalidArity(usize),
    #[error("component {index} out of range for {dim}-dimensional vector")]
    ComponentOutOfRange { index: usize, dim: usize },
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("handler panicked: {0}")]
    Panicked(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SketchError {
    /// Convenience for sketches reporting their own failures.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}
