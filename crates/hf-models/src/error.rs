//! Curve model errors.

use hf_core::HfError;
use thiserror::Error;

/// Result type for curve model construction and queries.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors from curve fitting and curve queries.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A spline needs at least two points.
    #[error("Too few curve points: {count} (minimum 2)")]
    TooFewPoints { count: usize },

    #[error("Invalid curve input: {what}")]
    InvalidCurve { what: &'static str },

    /// Query outside a non-extrapolating curve's span.
    #[error("Out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] HfError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::TooFewPoints { count: 1 };
        assert!(err.to_string().contains("minimum 2"));

        let err = ModelError::OutOfRange {
            what: "profile hour",
            value: 25.0,
        };
        assert!(err.to_string().contains("25"));
    }
}
