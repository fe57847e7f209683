//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the
//! database-agnostic error types defined in `smsledger_core` before they
//! leave this crate.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use smsledger_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Writer stopped: {0}")]
    WriterUnavailable(String),

    #[error(transparent)]
    Core(Error),
}

/// Lets write jobs return core errors through `immediate_transaction`.
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Io(e) => Error::Database(DatabaseError::ConnectionFailed(e.to_string())),
            StorageError::WriterUnavailable(e) => {
                Error::Database(DatabaseError::TransactionFailed(e))
            }
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
pub trait IntoCore<T> {
    fn into_core(self) -> smsledger_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> smsledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> smsledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_core_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_core_error_survives_round_trip() {
        let original = Error::Database(DatabaseError::NotFound("user u-1".to_string()));
        let back: Error = StorageError::from(original).into();
        assert!(back.is_not_found());
    }

    #[test]
    fn test_writer_unavailable_is_retryable() {
        let err: Error = StorageError::WriterUnavailable("closed".to_string()).into();
        assert!(err.is_retryable());
    }
}
