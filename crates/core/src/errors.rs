//! Core error types for smsledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//! Stage-specific failures of the ingestion pipeline live next to the stage
//! that raises them and are wrapped here via `#[from]`.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::transactions::{AssemblyError, SanitizationError};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for smsledger.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entity extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Extraction response could not be repaired: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("Transaction assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the caller may retry the same request unchanged.
    ///
    /// Only transport-level extraction failures and transient database
    /// failures qualify. Bad input, unparseable model output and
    /// unnormalisable amounts fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Extraction(e) => e.is_retryable(),
            Error::Database(DatabaseError::ConnectionFailed(_))
            | Error::Database(DatabaseError::PoolCreationFailed(_))
            | Error::Database(DatabaseError::TransactionFailed(_)) => true,
            _ => false,
        }
    }

    /// Whether this error means the referenced user or record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Unsupported origin '{0}'")]
    UnsupportedOrigin(String),

    #[error("Unknown transaction type '{0}'")]
    UnknownTransactionType(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
