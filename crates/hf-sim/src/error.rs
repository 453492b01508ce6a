//! Error types for solver construction.

use thiserror::Error;

/// Errors encountered while assembling a solver from its inputs.
///
/// Stepping never fails: non-convergence and incomplete cycles are reported
/// through the pass/outcome structs, not as errors.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<hf_models::ModelError> for SimError {
    fn from(e: hf_models::ModelError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_catalog::CatalogError> for SimError {
    fn from(e: hf_catalog::CatalogError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_core::HfError> for SimError {
    fn from(e: hf_core::HfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
