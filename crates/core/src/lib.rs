//! SMS Ledger Core - Domain entities, services, and traits.
//!
//! This crate turns mobile-money notification text into structured
//! transactions and summarizes transaction histories. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate and the `ai` crate.

pub mod analytics;
pub mod errors;
pub mod extraction;
pub mod transactions;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
