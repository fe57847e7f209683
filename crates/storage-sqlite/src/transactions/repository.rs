use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use smsledger_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
};
use smsledger_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let row = TransactionDB::from_new(Uuid::new_v4().to_string(), new_transaction);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(inserted))
            })
            .await
    }

    fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(&filter.user_id))
            .into_boxed();
        if let Some(kind) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(kind.as_str()));
        }
        if let Some(date) = &filter.date {
            query = query.filter(transactions::date.eq(date));
        }

        let rows = query
            .order((transactions::timestamp.asc(), transactions::id.asc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn count_for_user(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::users::UserRepository;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use smsledger_core::transactions::TransactionType;
    use smsledger_core::users::{NewUser, UserRepositoryTrait};
    use tempfile::tempdir;

    async fn create_test_repositories() -> (TransactionRepository, UserRepository, tempfile::TempDir)
    {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        crate::db::init(&db_path_str).expect("Failed to init database");
        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (
            TransactionRepository::new(Arc::clone(&pool), writer.clone()),
            UserRepository::new(pool, writer),
            temp_dir,
        )
    }

    fn new_transaction(kind: TransactionType, date: &str, minutes: i64) -> NewTransaction {
        NewTransaction {
            user_id: "u-1".to_string(),
            transaction_type: kind,
            amount: dec!(1250.75),
            fee: dec!(0.50),
            tax: Decimal::ZERO,
            balance_before: dec!(100),
            balance_after: dec!(1350.75),
            date: date.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
                + Duration::minutes(minutes),
            sender: "KWAME MENSAH".to_string(),
            receiver: String::new(),
            transaction_id: "48213377901".to_string(),
            reference: "rent".to_string(),
            raw_message: "Payment received for GHS 1,250.75".to_string(),
            origin: "MobileMoney".to_string(),
        }
    }

    async fn seed_user(users: &UserRepository) {
        users
            .create(NewUser {
                id: Some("u-1".to_string()),
                currency: Some("GHS".to_string()),
                balance: None,
            })
            .await
            .expect("Failed to create user");
    }

    #[tokio::test]
    async fn test_insert_round_trips_values() {
        let (repo, users, _dir) = create_test_repositories().await;
        seed_user(&users).await;

        let new = new_transaction(TransactionType::Credit, "2024-06-01", 0);
        let stored = repo.insert(new.clone()).await.unwrap();

        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert_eq!(stored.amount, dec!(1250.75));
        assert_eq!(stored.timestamp, new.timestamp);

        let listed = repo.list(&TransactionFilter::for_user("u-1")).unwrap();
        assert_eq!(listed, vec![stored]);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_timestamp() {
        let (repo, users, _dir) = create_test_repositories().await;
        seed_user(&users).await;

        repo.insert(new_transaction(TransactionType::Debit, "2024-06-02", 30))
            .await
            .unwrap();
        repo.insert(new_transaction(TransactionType::Credit, "2024-06-01", 10))
            .await
            .unwrap();
        repo.insert(new_transaction(TransactionType::Credit, "2024-06-02", 20))
            .await
            .unwrap();

        let all = repo.list(&TransactionFilter::for_user("u-1")).unwrap();
        let dates: Vec<_> = all.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-02"]);

        let credits_on_second = repo
            .list(&TransactionFilter {
                user_id: "u-1".to_string(),
                transaction_type: Some(TransactionType::Credit),
                date: Some("2024-06-02".to_string()),
            })
            .unwrap();
        assert_eq!(credits_on_second.len(), 1);

        assert_eq!(repo.count_for_user("u-1").unwrap(), 3);
        assert_eq!(repo.count_for_user("nobody").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_for_unknown_user_is_rejected() {
        let (repo, _users, _dir) = create_test_repositories().await;

        let result = repo
            .insert(new_transaction(TransactionType::Credit, "2024-06-01", 0))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let (_repo, users, _dir) = create_test_repositories().await;
        seed_user(&users).await;

        let user = users.get_by_id("u-1").unwrap();
        assert_eq!(user.currency, "GHS");
        assert_eq!(user.balance, Decimal::ZERO);
        assert!(users.get_by_id("u-2").unwrap_err().is_not_found());

        let duplicate = users
            .create(NewUser {
                id: Some("u-1".to_string()),
                ..Default::default()
            })
            .await;
        assert!(duplicate.is_err());
    }
}
