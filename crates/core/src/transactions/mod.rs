//! Transactions module - ingestion pipeline, domain models, services, and traits.

mod assembler;
mod currency;
mod direction;
mod sanitizer;
mod sms_parser;
mod transactions_constants;
mod transactions_errors;
mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use assembler::TransactionAssembler;
pub use currency::CurrencyNormalizer;
pub use direction::classify_direction;
pub use sanitizer::{
    close_truncated_object, remove_contamination, remove_escaped_newlines, repair, sanitize,
    strip_code_fences, trim_receiver_overflow,
};
pub use sms_parser::SmsParser;
pub use transactions_constants::*;
pub use transactions_errors::{AssemblyError, CurrencyError, SanitizationError};
pub use transactions_model::{
    present, ExtractedFields, IngestTransactionRequest, NewTransaction, ParsedSms,
    RawNotification, Transaction, TransactionFilter, TransactionHistory, TransactionOrigin,
    TransactionQuery, TransactionType,
};
pub use transactions_service::{FallbackPolicy, IngestionConfig, TransactionService};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
