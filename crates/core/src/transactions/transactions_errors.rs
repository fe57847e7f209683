//! Failures of the sanitize and assemble stages.

use thiserror::Error;

/// The extraction service answered but its text could not be turned into
/// structured fields even after repair.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (cleaned text: {cleaned})")]
pub struct SanitizationError {
    /// Parser diagnostic for the repaired text.
    pub message: String,
    /// Text after every repair step, kept for diagnostics.
    pub cleaned: String,
}

/// A load-bearing numeric field could not be normalised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Could not convert {field} '{value}' to a number")]
    Unparseable { field: &'static str, value: String },

    #[error("No {field} found in the extracted fields or the message")]
    Missing { field: &'static str },
}

impl AssemblyError {
    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            AssemblyError::Unparseable { field, .. } | AssemblyError::Missing { field } => field,
        }
    }
}

/// Strict currency parse failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurrencyError {
    #[error("invalid currency format: {0}")]
    InvalidFormat(String),

    #[error("error parsing currency value: {0}")]
    InvalidValue(String),
}
