//! Error types for simulation construction
//!
//! Stepping never fails: every random draw is valid and every neighbour lookup
//! is bounds-checked. Errors only arise while building a simulation from
//! invalid parameters or inconsistent input grids, and are never clamped away.

use thiserror::Error;

/// Errors raised while configuring or constructing a simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A grid dimension was zero
    #[error("Grid dimension {name} must be positive, got {value}")]
    InvalidDimension { name: &'static str, value: usize },

    /// A probability parameter was NaN or outside `[0, 1]`
    #[error("Probability {name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Temperature noise standard deviation was negative or not finite
    #[error("Temperature noise level must be finite and non-negative, got {0}")]
    InvalidNoiseLevel(f64),

    /// A temperature curve parameter was not finite
    #[error("Temperature parameter {name} must be finite, got {value}")]
    InvalidTemperature { name: &'static str, value: f64 },

    /// An injected grid does not have the configured shape
    #[error("Grid shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A flat cell buffer does not hold `rows * cols` cells
    #[error("Expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },

    /// Cell code outside the seven defined states
    #[error("Undefined cell state code {0}")]
    UndefinedCellState(i8),

    /// The pre-cloud layer must never hold a cloud
    #[error("Pre-cloud layer holds a cloud at ({row}, {col})")]
    CloudInSnapshot { row: usize, col: usize },

    /// Unrecognised wind direction label
    #[error("Unknown wind direction '{0}'")]
    UnknownWind(String),
}

/// Result alias for fallible simulation operations
pub type SimResult<T> = Result<T, SimError>;
