//! Error types for the hf-app service layer.

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<hf_core::HfError> for AppError {
    fn from(err: hf_core::HfError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<hf_catalog::CatalogError> for AppError {
    fn from(err: hf_catalog::CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<hf_sim::SimError> for AppError {
    fn from(err: hf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<hf_results::ResultsError> for AppError {
    fn from(err: hf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
