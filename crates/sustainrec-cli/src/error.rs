//! Error types for sustainrec-cli

use std::path::PathBuf;
use std::process::ExitCode;

use sustainrec::SustainError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Dataset file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Dataset could not be parsed
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad argument value
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Library error
    #[error("Recommender error: {0}")]
    Recommender(String),

    /// Server failed to start or crashed
    #[error("Server error: {0}")]
    Server(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl CliError {
    /// Get exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::InvalidDataset(_) => ExitCode::from(4),
            Self::ValidationFailed(_) => ExitCode::from(5),
            Self::Server(_) => ExitCode::from(6),
            Self::Io(_) => ExitCode::from(7),
            Self::Recommender(_) => ExitCode::from(1),
            Self::NetworkError(_) => ExitCode::from(10),
        }
    }
}

impl From<SustainError> for CliError {
    fn from(e: SustainError) -> Self {
        match e {
            SustainError::Io(io) => Self::Io(io),
            SustainError::Validation { .. } => Self::ValidationFailed(e.to_string()),
            SustainError::Csv(_) | SustainError::MissingColumn { .. } => {
                Self::InvalidDataset(e.to_string())
            }
            other => Self::Recommender(other.to_string()),
        }
    }
}
