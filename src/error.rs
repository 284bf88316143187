//! Error type for propagation operations

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, PropagationError>;

/// Configuration errors reported before any field is computed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    /// Grid must have at least 2 nodes along each axis
    #[error("grid resolution {width}x{height} is too small (need at least 2x2)")]
    InvalidResolution { width: usize, height: usize },

    /// World bounds are empty, inverted or not finite
    #[error("world bounds must be finite with positive width and height")]
    InvalidBounds,

    /// No sources were supplied
    #[error("at least one source is required")]
    NoSources,

    /// Threshold is zero, negative or not finite
    #[error("threshold {0} must be a finite positive arrival time")]
    InvalidThreshold(f64),

    /// Ring spacing would produce more levels than can be extracted
    #[error("{requested} rings requested, at most {max} are supported")]
    TooManyRings { requested: usize, max: usize },

    /// Home source index is out of range
    #[error("source index {index} out of range for {count} sources")]
    InvalidSourceIndex { index: usize, count: usize },

    /// Source parameters are out of range
    #[error("invalid source: {0}")]
    InvalidSource(String),
}
