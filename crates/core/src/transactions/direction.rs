//! Credit/debit classification from free text.

use super::transactions_model::TransactionType;

/// Checked first; any hit makes the message a debit.
const DEBIT_PHRASES: &[&str] = &[
    "payment made",
    "paid",
    "sent to",
    "transferred to",
    "withdrawal",
    "withdrew",
    "debited",
    "cash out",
    "debit alert",
    "debit",
];

/// Checked only when no debit phrase matched.
const CREDIT_PHRASES: &[&str] = &[
    "payment received",
    "money received",
    "cash received",
    "received",
    "credited",
    "credit",
    "deposited",
    "deposit",
    "cash in",
];

/// Classifies the direction of money flow described by `text`.
///
/// Debit phrases win over credit phrases when both appear. Text that
/// matches neither list but starts with "payment" is a debit; anything
/// else is `Unknown`.
pub fn classify_direction(text: &str) -> TransactionType {
    let lowered = text.to_lowercase();

    if DEBIT_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return TransactionType::Debit;
    }
    if CREDIT_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return TransactionType::Credit;
    }
    if lowered.trim_start().starts_with("payment") {
        return TransactionType::Debit;
    }
    TransactionType::Unknown
}
