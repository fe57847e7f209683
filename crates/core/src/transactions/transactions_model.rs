//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::transactions_constants::{
    ABSENT_FIELD_MARKERS, ORIGIN_AT_MONEY, ORIGIN_FIDELITY, ORIGIN_MOBILE_MONEY,
};
use crate::analytics::AnalyticsReport;
use crate::errors::{Error, Result, ValidationError};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in.
    Credit,
    /// Money out.
    Debit,
    #[default]
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
            TransactionType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            "unknown" | "" => Ok(TransactionType::Unknown),
            other => Err(ValidationError::UnknownTransactionType(other.to_string()).into()),
        }
    }
}

/// Channel that sent the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionOrigin {
    #[serde(rename = "MobileMoney")]
    MobileMoney,
    #[serde(rename = "ATMoney")]
    AtMoney,
    #[serde(rename = "Fidelity")]
    Fidelity,
}

impl TransactionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionOrigin::MobileMoney => ORIGIN_MOBILE_MONEY,
            TransactionOrigin::AtMoney => ORIGIN_AT_MONEY,
            TransactionOrigin::Fidelity => ORIGIN_FIDELITY,
        }
    }
}

impl fmt::Display for TransactionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionOrigin {
    type Err = Error;

    /// Labels are matched exactly; the sending apps use fixed spellings.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            ORIGIN_MOBILE_MONEY => Ok(TransactionOrigin::MobileMoney),
            ORIGIN_AT_MONEY => Ok(TransactionOrigin::AtMoney),
            ORIGIN_FIDELITY => Ok(TransactionOrigin::Fidelity),
            other => Err(ValidationError::UnsupportedOrigin(other.to_string()).into()),
        }
    }
}

/// One incoming notification, as received from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNotification {
    pub message: String,
    /// Caller-supplied date text, stored verbatim as the transaction date.
    pub occurred_at: String,
    pub origin: TransactionOrigin,
}

impl RawNotification {
    /// Validates caller input and builds a notification.
    pub fn new(message: &str, occurred_at: &str, origin_label: &str) -> Result<Self> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::MissingField("message".to_string()).into());
        }
        let origin = origin_label.parse::<TransactionOrigin>()?;
        Ok(Self {
            message: message.to_string(),
            occurred_at: occurred_at.trim().to_string(),
            origin,
        })
    }
}

/// Request body for ingesting one notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestTransactionRequest {
    pub message: String,
    /// Caller-side date of the notification.
    #[serde(default)]
    pub time: String,
    /// Sending channel label (`MobileMoney`, `ATMoney` or `Fidelity`).
    pub sender: String,
}

/// Fields pulled out of a notification by the text-generation service.
///
/// Every field is optional. Values the model emits as numbers are kept as
/// their text form, and the usual "no value" markers read as `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub receiver: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fee: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tax: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub balance: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reference: Option<String>,
}

/// Returns `None` for blank text and for the markers models use for "no value".
pub fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if ABSENT_FIELD_MARKERS.contains(&lowered.as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => present(&s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        // Nested structures carry no usable scalar.
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    })
}

/// Best-effort record produced by the heuristic SMS parser.
///
/// Unmatched patterns leave their field unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSms {
    pub transaction_type: TransactionType,
    pub amount: Option<Decimal>,
    pub fee: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub balance_before: Option<Decimal>,
    pub balance_after: Option<Decimal>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub transaction_id: Option<String>,
    pub reference: Option<String>,
}

/// A fully assembled transaction ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub fee: Decimal,
    pub tax: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub date: String,
    /// Server time at assembly.
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub receiver: String,
    pub transaction_id: String,
    pub reference: String,
    pub raw_message: String,
    pub origin: String,
}

/// Domain model representing a persisted transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub fee: Decimal,
    pub tax: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub date: String,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub receiver: String,
    pub transaction_id: String,
    pub reference: String,
    pub raw_message: String,
    pub origin: String,
}

impl Transaction {
    /// Builds the persisted form of `new` under the given id.
    pub fn from_new(id: impl Into<String>, new: NewTransaction) -> Self {
        Self {
            id: id.into(),
            user_id: new.user_id,
            transaction_type: new.transaction_type,
            amount: new.amount,
            fee: new.fee,
            tax: new.tax,
            balance_before: new.balance_before,
            balance_after: new.balance_after,
            date: new.date,
            timestamp: new.timestamp,
            sender: new.sender,
            receiver: new.receiver,
            transaction_id: new.transaction_id,
            reference: new.reference,
            raw_message: new.raw_message,
            origin: new.origin,
        }
    }

    /// Sender if known, otherwise receiver. `None` when both are blank.
    pub fn counterparty(&self) -> Option<&str> {
        [self.sender.as_str(), self.receiver.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|name| !name.is_empty())
    }
}

/// Equality filter for listing a user's transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub user_id: String,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<String>,
}

impl TransactionFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

/// Query parameters accepted from callers, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

/// Transactions matching a query together with their analytics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    pub transactions: Vec<Transaction>,
    #[serde(flatten)]
    pub analytics: AnalyticsReport,
}
