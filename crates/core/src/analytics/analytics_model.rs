//! Report structures derived from a transaction history.
//!
//! Reports are recomputed per query and never persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::transactions::TransactionType;

/// Activity within one hour of the day.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStats {
    /// `"HH:00"`, UTC.
    pub hour: String,
    pub transactions: usize,
    pub volume: Decimal,
}

/// Flows exchanged with one counterparty.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CounterpartyStats {
    pub name: String,
    pub transactions: usize,
    /// Gross amount across all transactions with this counterparty.
    pub volume: Decimal,
    /// Credits minus debits.
    pub net_amount: Decimal,
    /// Direction of the most recent transaction.
    #[serde(rename = "type")]
    pub last_type: TransactionType,
}

/// Flows on one caller-supplied date.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub credits: Decimal,
    pub debits: Decimal,
    /// Balance after the last transaction of the day.
    pub balance: Decimal,
    pub net_flow: Decimal,
}

/// Share of transactions sent by one channel.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginStats {
    pub name: String,
    pub value: usize,
    pub percentage: Decimal,
}

/// An amount with its change against the previous day.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetric {
    pub amount: Decimal,
    pub percentage_change: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicStats {
    pub total_transactions: usize,
    pub net_flow: FlowMetric,
    pub income: FlowMetric,
    pub expense: FlowMetric,
}

/// Headline amount metrics. Min/max are `None` until a transaction is seen.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalysis {
    pub total_volume: Decimal,
    pub average_transaction: Decimal,
    pub max_transaction: Option<Decimal>,
    pub min_transaction: Option<Decimal>,
    pub max_balance: Option<Decimal>,
    pub min_balance: Option<Decimal>,
    pub total_fees: Decimal,
    pub total_tax: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeAnalysis {
    pub hourly_stats: Vec<HourlyStats>,
    pub daily_stats: Vec<DailyStats>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalysis {
    pub user_stats: Vec<CounterpartyStats>,
    pub unique_users: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginAnalysis {
    pub origins: Vec<OriginStats>,
    pub primary_origin: Option<String>,
}

/// Aggregates over one set of transactions.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub basic_stats: BasicStats,
    pub transaction_analysis: TransactionAnalysis,
    pub time_analysis: TimeAnalysis,
    pub user_analysis: UserAnalysis,
    pub origin_analysis: OriginAnalysis,
}
