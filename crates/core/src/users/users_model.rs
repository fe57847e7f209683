//! User domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Owner of a transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub currency: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub currency: Option<String>,
    pub balance: Option<Decimal>,
}
