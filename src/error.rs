//! Error types for sustainrec operations.
//!
//! Lookup misses are not errors: an empty result is a successful answer.
//! Only malformed input, unreadable datasets and internal faults surface here.

use std::fmt;

/// Main error type for sustainrec operations.
///
/// # Examples
///
/// ```
/// use sustainrec::error::SustainError;
///
/// let err = SustainError::validation("recyclable", "expected true or false");
/// assert!(err.is_validation());
/// assert!(err.to_string().contains("recyclable"));
/// ```
#[derive(Debug)]
pub enum SustainError {
    /// I/O error (dataset file not found, permission denied, etc.).
    Io(std::io::Error),

    /// CSV decoding failure.
    Csv(csv::Error),

    /// A column the schema requires is absent from the dataset header.
    MissingColumn {
        /// Canonical column name
        column: String,
        /// Headers actually present
        available: Vec<String>,
    },

    /// Caller-supplied input is missing or has the wrong type.
    Validation {
        /// Offending field
        field: String,
        /// What was expected
        message: String,
    },

    /// Vectors of different length were compared.
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Operation received no data to work on.
    EmptyInput(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SustainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SustainError::Io(e) => write!(f, "I/O error: {e}"),
            SustainError::Csv(e) => write!(f, "CSV error: {e}"),
            SustainError::MissingColumn { column, available } => {
                write!(
                    f,
                    "Missing required column '{column}' (available: {})",
                    available.join(", ")
                )
            }
            SustainError::Validation { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            SustainError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Vector dimension mismatch: expected {expected}, got {actual}"
                )
            }
            SustainError::EmptyInput(context) => write!(f, "empty input: {context}"),
            SustainError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SustainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SustainError::Io(e) => Some(e),
            SustainError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SustainError {
    fn from(err: std::io::Error) -> Self {
        SustainError::Io(err)
    }
}

impl From<csv::Error> for SustainError {
    fn from(err: csv::Error) -> Self {
        SustainError::Csv(err)
    }
}

impl From<&str> for SustainError {
    fn from(msg: &str) -> Self {
        SustainError::Other(msg.to_string())
    }
}

impl From<String> for SustainError {
    fn from(msg: String) -> Self {
        SustainError::Other(msg)
    }
}

impl SustainError {
    /// Create a validation error for `field`.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the caller is at fault (as opposed to the dataset or the service).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SustainError>;
