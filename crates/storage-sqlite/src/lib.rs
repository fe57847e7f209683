//! SQLite storage implementation for smsledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `smsledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users and transactions
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from smsledger-core for convenience
pub use smsledger_core::errors::{DatabaseError, Error, Result};
