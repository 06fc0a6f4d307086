//! Error types for the cf-app service layer.

use std::path::PathBuf;

use cf_core::CfError;
use cf_formula::{SolveError, SpecError};

/// Application error type wrapping the calculator crates' errors for
/// every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("Formula catalogue error: {0}")]
    Spec(#[from] SpecError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for cf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<CfError> for AppError {
    fn from(err: CfError) -> Self {
        AppError::Solve(SolveError::from(err))
    }
}
