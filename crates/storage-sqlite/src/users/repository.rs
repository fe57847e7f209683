use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use smsledger_core::errors::DatabaseError;
use smsledger_core::transactions::DEFAULT_CURRENCY_CODE;
use smsledger_core::users::{NewUser, User, UserRepositoryTrait};
use smsledger_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::from)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user_id)).into())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let user_db = UserDB::new(
            new_user
                .id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            new_user
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),
            new_user.balance.unwrap_or_default(),
        );

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(inserted))
            })
            .await
    }
}
