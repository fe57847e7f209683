//! Database models for users.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::utils::parse_decimal_string_tolerant;
use smsledger_core::users::User;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub currency: String,
    pub balance: String,
    pub created_at: NaiveDateTime,
}

impl UserDB {
    pub fn new(id: String, currency: String, balance: Decimal) -> Self {
        Self {
            id,
            currency,
            balance: balance.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            balance: parse_decimal_string_tolerant(&db.balance, "balance"),
            id: db.id,
            currency: db.currency,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}
