use crate::errors::Result;
use crate::transactions::transactions_model::{
    IngestTransactionRequest, NewTransaction, Transaction, TransactionFilter, TransactionHistory,
    TransactionQuery,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for transaction repository operations.
///
/// Transactions are immutable once inserted; there is no update path.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Persists `new_transaction` under a freshly generated id.
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Lists transactions matching `filter`, oldest `timestamp` first.
    fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Number of transactions stored for `user_id`.
    fn count_for_user(&self, user_id: &str) -> Result<i64>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Extracts, assembles and persists one notification for `user_id`.
    async fn ingest(&self, user_id: &str, request: IngestTransactionRequest)
        -> Result<Transaction>;

    /// Lists a user's transactions with analytics computed as of `as_of`.
    fn get_transactions(
        &self,
        user_id: &str,
        query: TransactionQuery,
        as_of: NaiveDate,
    ) -> Result<TransactionHistory>;

    /// Number of transactions recorded for an existing user.
    fn count_transactions(&self, user_id: &str) -> Result<i64>;
}
