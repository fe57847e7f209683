//! Single-pass aggregation of a transaction history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::analytics_model::{
    AnalyticsReport, BasicStats, CounterpartyStats, DailyStats, FlowMetric, HourlyStats,
    OriginAnalysis, OriginStats, TimeAnalysis, TransactionAnalysis, UserAnalysis,
};
use crate::transactions::{Transaction, TransactionType, DATE_FORMAT};

/// Relative change from `previous` to `current`, in percent.
///
/// Zero when `previous` is zero. Rounded to two decimal places.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous.abs()))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

/// Summarizes `transactions` with period comparisons anchored on `as_of`.
///
/// "Today" and "yesterday" are matched against each transaction's `date`
/// text by exact equality with `as_of` and its predecessor formatted as
/// `YYYY-MM-DD`. When `as_of` has no predecessor the yesterday bucket stays
/// empty. Sums that leave the `Decimal` range saturate instead of failing
/// the report. Input order decides the per-day balance snapshot and the
/// last-seen type of each counterparty.
pub fn summarize(transactions: &[Transaction], as_of: NaiveDate) -> AnalyticsReport {
    let today = as_of.format(DATE_FORMAT).to_string();
    let yesterday = as_of
        .pred_opt()
        .map(|day| day.format(DATE_FORMAT).to_string());

    let mut acc = Accumulator::default();
    for tx in transactions {
        acc.add(tx, &today, yesterday.as_deref());
    }
    acc.finish()
}

/// Signed contribution of one transaction to net flow.
fn signed_amount(tx: &Transaction) -> Decimal {
    match tx.transaction_type {
        TransactionType::Credit => tx.amount,
        TransactionType::Debit => -tx.amount,
        TransactionType::Unknown => Decimal::ZERO,
    }
}

#[derive(Default)]
struct PeriodFlows {
    credits: Decimal,
    debits: Decimal,
}

impl PeriodFlows {
    fn add(&mut self, tx: &Transaction) {
        match tx.transaction_type {
            TransactionType::Credit => accumulate(&mut self.credits, tx.amount, "credits"),
            TransactionType::Debit => accumulate(&mut self.debits, tx.amount, "debits"),
            TransactionType::Unknown => {}
        }
    }

    fn net(&self) -> Decimal {
        self.credits.saturating_sub(self.debits)
    }
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    total_volume: Decimal,
    totals: PeriodFlows,
    today: PeriodFlows,
    yesterday: PeriodFlows,
    max_amount: Option<Decimal>,
    min_amount: Option<Decimal>,
    max_balance: Option<Decimal>,
    min_balance: Option<Decimal>,
    total_fees: Decimal,
    total_tax: Decimal,
    hourly: BTreeMap<String, HourlyStats>,
    daily: BTreeMap<String, DailyStats>,
    counterparties: BTreeMap<String, CounterpartyStats>,
    origins: BTreeMap<String, usize>,
}

impl Accumulator {
    fn add(&mut self, tx: &Transaction, today: &str, yesterday: Option<&str>) {
        self.count += 1;
        accumulate(&mut self.total_volume, tx.amount, "total volume");
        accumulate(&mut self.total_fees, tx.fee, "total fees");
        accumulate(&mut self.total_tax, tx.tax, "total tax");
        self.totals.add(tx);

        if tx.date == today {
            self.today.add(tx);
        } else if yesterday == Some(tx.date.as_str()) {
            self.yesterday.add(tx);
        }

        track_max(&mut self.max_amount, tx.amount);
        track_min(&mut self.min_amount, tx.amount);
        track_max(&mut self.max_balance, tx.balance_after);
        track_min(&mut self.min_balance, tx.balance_after);

        let hour = tx.timestamp.format("%H:00").to_string();
        let hourly = self
            .hourly
            .entry(hour.clone())
            .or_insert_with(|| HourlyStats {
                hour,
                transactions: 0,
                volume: Decimal::ZERO,
            });
        hourly.transactions += 1;
        accumulate(&mut hourly.volume, tx.amount, "hourly volume");

        let daily = self
            .daily
            .entry(tx.date.clone())
            .or_insert_with(|| DailyStats {
                date: tx.date.clone(),
                credits: Decimal::ZERO,
                debits: Decimal::ZERO,
                balance: Decimal::ZERO,
                net_flow: Decimal::ZERO,
            });
        match tx.transaction_type {
            TransactionType::Credit => accumulate(&mut daily.credits, tx.amount, "daily credits"),
            TransactionType::Debit => accumulate(&mut daily.debits, tx.amount, "daily debits"),
            TransactionType::Unknown => {}
        }
        accumulate(&mut daily.net_flow, signed_amount(tx), "daily net flow");
        daily.balance = tx.balance_after;

        if let Some(name) = tx.counterparty() {
            let stats = self
                .counterparties
                .entry(name.to_string())
                .or_insert_with(|| CounterpartyStats {
                    name: name.to_string(),
                    transactions: 0,
                    volume: Decimal::ZERO,
                    net_amount: Decimal::ZERO,
                    last_type: tx.transaction_type,
                });
            stats.transactions += 1;
            accumulate(&mut stats.volume, tx.amount, "counterparty volume");
            accumulate(&mut stats.net_amount, signed_amount(tx), "counterparty net");
            stats.last_type = tx.transaction_type;
        }

        *self.origins.entry(tx.origin.clone()).or_insert(0) += 1;
    }

    fn finish(self) -> AnalyticsReport {
        let average_transaction = if self.count == 0 {
            Decimal::ZERO
        } else {
            (self.total_volume / Decimal::from(self.count)).round_dp(2)
        };

        let origin_analysis = self.origin_analysis();
        let unique_users = self.counterparties.len();

        AnalyticsReport {
            basic_stats: BasicStats {
                total_transactions: self.count,
                net_flow: FlowMetric {
                    amount: self.totals.net(),
                    percentage_change: percentage_change(self.today.net(), self.yesterday.net()),
                },
                income: FlowMetric {
                    amount: self.totals.credits,
                    percentage_change: percentage_change(
                        self.today.credits,
                        self.yesterday.credits,
                    ),
                },
                expense: FlowMetric {
                    amount: self.totals.debits,
                    percentage_change: percentage_change(self.today.debits, self.yesterday.debits),
                },
            },
            transaction_analysis: TransactionAnalysis {
                total_volume: self.total_volume,
                average_transaction,
                max_transaction: self.max_amount,
                min_transaction: self.min_amount,
                max_balance: self.max_balance,
                min_balance: self.min_balance,
                total_fees: self.total_fees,
                total_tax: self.total_tax,
            },
            time_analysis: TimeAnalysis {
                hourly_stats: self.hourly.into_values().collect(),
                daily_stats: self.daily.into_values().collect(),
            },
            user_analysis: UserAnalysis {
                user_stats: self.counterparties.into_values().collect(),
                unique_users,
            },
            origin_analysis,
        }
    }

    fn origin_analysis(&self) -> OriginAnalysis {
        let origins = self
            .origins
            .iter()
            .map(|(name, &value)| OriginStats {
                name: name.clone(),
                value,
                percentage: share(value, self.count),
            })
            .collect();

        // Ties resolve to the first origin in key order.
        let primary_origin = self
            .origins
            .iter()
            .fold(None::<(&String, usize)>, |best, (name, &value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((name, value)),
            })
            .map(|(name, _)| name.clone());

        OriginAnalysis {
            origins,
            primary_origin,
        }
    }
}

/// Adds `value` to `total`, clamping at the `Decimal` bounds.
fn accumulate(total: &mut Decimal, value: Decimal, what: &str) {
    let current = *total;
    *total = current.checked_add(value).unwrap_or_else(|| {
        warn!("{} overflowed, clamping at the decimal bound", what);
        current.saturating_add(value)
    });
}

fn share(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * dec!(100) / Decimal::from(whole)).round_dp(2)
}

fn track_max(slot: &mut Option<Decimal>, value: Decimal) {
    if slot.map_or(true, |current| value > current) {
        *slot = Some(value);
    }
}

fn track_min(slot: &mut Option<Decimal>, value: Decimal) {
    if slot.map_or(true, |current| value < current) {
        *slot = Some(value);
    }
}
