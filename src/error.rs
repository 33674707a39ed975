//! Crate error types.
//!
//! Sizing degradations are not errors: they surface as notices and a
//! cleared or failed cable/conduit state. Only usage errors and I/O land here.

use thiserror::Error;

/// Precondition violations when building a circuit for sizing.
#[derive(Debug, Error, PartialEq)]
pub enum SizingError {
    #[error("invalid input `{field}`: {message}")]
    InvalidInput { field: String, message: String },
}

impl SizingError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        SizingError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Failures while writing circuit reports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
