//! Error types for the core domain

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid {field} '{value}': {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Malformed article XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Article could not be parsed: {0}")]
    Parse(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report row: {0}")]
    Csv(#[from] csv::Error),
}

impl CoreError {
    pub(crate) fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
