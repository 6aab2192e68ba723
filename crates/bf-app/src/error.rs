//! Error types for the bf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported configuration: {message}")]
    Unsupported { message: String },

    #[error("Network compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<bf_project::ProjectError> for AppError {
    fn from(err: bf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<bf_sim::SimError> for AppError {
    fn from(err: bf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<bf_graph::GraphError> for AppError {
    fn from(err: bf_graph::GraphError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<bf_flow::FlowError> for AppError {
    fn from(err: bf_flow::FlowError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
