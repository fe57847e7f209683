use serde::{Deserialize, Serialize};
use smsledger_core::transactions::{Transaction, TransactionQuery};
use smsledger_core::users::User;

/// Envelope for every successful response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub transaction: Transaction,
}

/// A user together with how many transactions they have recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub transaction_count: i64,
}

/// Query string of `GET /users/{userId}/transactions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub date: Option<String>,
    /// Anchor date for today/yesterday comparisons; defaults to the current UTC date.
    pub as_of: Option<String>,
}

impl TransactionListParams {
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery {
            transaction_type: self.transaction_type.clone(),
            date: self.date.clone(),
        }
    }
}
