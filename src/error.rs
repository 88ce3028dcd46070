//! Error types for ode-math

use thiserror::Error;

/// Main error type for ode-math operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Operand of the wrong kind (e.g. text where a number was expected)
    #[error("no implicit conversion from {found} to {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Two vectors of different order were combined
    #[error("dimension mismatch: expected order {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Operation only defined for a specific order
    #[error("{operation} requires order-{expected} vectors, got order {actual}")]
    OrderRequired {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Wrong number of constructor arguments
    #[error("wrong number of arguments ({actual} for {expected})")]
    Arity {
        expected: &'static str,
        actual: usize,
    },

    /// Element index past the end
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Scalar division by exactly zero
    #[error("divided by 0")]
    DivisionByZero,

    /// Normalizing or inverting something with zero magnitude
    #[error("cannot {0} a zero-magnitude value")]
    ZeroMagnitude(&'static str),

    /// Argument outside a function's mathematical domain
    #[error("domain error: {0}")]
    Domain(String),

    /// Text that does not parse as a float
    #[error("invalid value for Float(): {0:?}")]
    InvalidNumber(String),

    /// Malformed configuration value
    #[error("invalid configuration {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Result type alias for ode-math operations
pub type Result<T> = std::result::Result<T, GeometryError>;
