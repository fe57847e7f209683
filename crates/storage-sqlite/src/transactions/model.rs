//! Database models for transactions.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use log::warn;

use crate::utils::parse_decimal_string_tolerant;
use smsledger_core::transactions::{NewTransaction, Transaction, TransactionType};

/// Database model for transactions. Monetary columns hold decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub fee: String,
    pub tax: String,
    pub balance_before: String,
    pub balance_after: String,
    pub date: String,
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub receiver: String,
    pub transaction_id: String,
    pub reference: String,
    pub raw_message: String,
    pub origin: String,
}

impl TransactionDB {
    pub fn from_new(id: String, new: NewTransaction) -> Self {
        Self {
            id,
            user_id: new.user_id,
            transaction_type: new.transaction_type.as_str().to_string(),
            amount: new.amount.to_string(),
            fee: new.fee.to_string(),
            tax: new.tax.to_string(),
            balance_before: new.balance_before.to_string(),
            balance_after: new.balance_after.to_string(),
            date: new.date,
            timestamp: new.timestamp.naive_utc(),
            sender: new.sender,
            receiver: new.receiver,
            transaction_id: new.transaction_id,
            reference: new.reference,
            raw_message: new.raw_message,
            origin: new.origin,
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let transaction_type = db
            .transaction_type
            .parse::<TransactionType>()
            .unwrap_or_else(|_| {
                warn!(
                    "Transaction {} has unrecognised type '{}', reading as unknown",
                    db.id, db.transaction_type
                );
                TransactionType::Unknown
            });

        Self {
            amount: parse_decimal_string_tolerant(&db.amount, "amount"),
            fee: parse_decimal_string_tolerant(&db.fee, "fee"),
            tax: parse_decimal_string_tolerant(&db.tax, "tax"),
            balance_before: parse_decimal_string_tolerant(&db.balance_before, "balance_before"),
            balance_after: parse_decimal_string_tolerant(&db.balance_after, "balance_after"),
            timestamp: Utc.from_utc_datetime(&db.timestamp),
            transaction_type,
            id: db.id,
            user_id: db.user_id,
            date: db.date,
            sender: db.sender,
            receiver: db.receiver,
            transaction_id: db.transaction_id,
            reference: db.reference,
            raw_message: db.raw_message,
            origin: db.origin,
        }
    }
}
