//! Property-based tests for the extraction pipeline and analytics.
//!
//! These exercise the parsing and aggregation code over random inputs using
//! `proptest`.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use smsledger_core::analytics::summarize;
use smsledger_core::analytics::percentage_change;
use smsledger_core::transactions::{
    repair, sanitize, CurrencyNormalizer, SmsParser, Transaction, TransactionType,
};

// =============================================================================
// Generators
// =============================================================================

fn arb_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Credit),
        Just(TransactionType::Debit),
        Just(TransactionType::Unknown),
    ]
}

/// Amount in pesewas, kept to two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Any non-negative decimal, up to `Decimal::MAX`.
fn arb_large_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>())
        .prop_map(|(lo, mid, hi)| Decimal::from_parts(lo, mid, hi, false, 0))
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        arb_type(),
        arb_amount(),
        arb_amount(),
        0u32..24,
        1u32..29,
        prop_oneof![Just("MobileMoney"), Just("ATMoney"), Just("Fidelity")],
        "[A-Z]{0,8}",
    )
        .prop_map(|(transaction_type, amount, balance, hour, day, origin, sender)| {
            Transaction {
                id: format!("tx-{}-{}", day, hour),
                user_id: "u-1".to_string(),
                transaction_type,
                amount,
                fee: Decimal::ZERO,
                tax: Decimal::ZERO,
                balance_before: Decimal::ZERO,
                balance_after: balance,
                date: format!("2024-06-{:02}", day),
                timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
                sender,
                receiver: String::new(),
                transaction_id: String::new(),
                reference: String::new(),
                raw_message: String::new(),
                origin: origin.to_string(),
            }
        })
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn parser_never_panics(message in ".{0,300}") {
        let _ = SmsParser::default().parse(&message);
    }

    #[test]
    fn parser_reads_formatted_amount(cents in 0i64..1_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let message = format!("Payment received for GHS {} from ADJOA", amount);
        let parsed = SmsParser::default().parse(&message);
        prop_assert_eq!(parsed.amount, Some(amount));
    }

    #[test]
    fn normalizer_accepts_prefixed_amounts(cents in 0i64..1_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let normalizer = CurrencyNormalizer::default();
        prop_assert_eq!(normalizer.try_normalize(&format!("GHS {}", amount)).ok(), Some(amount));
        prop_assert_eq!(normalizer.try_normalize(&amount.to_string()).ok(), Some(amount));
    }

    #[test]
    fn repaired_output_is_always_closed(raw in ".{0,200}") {
        prop_assert!(repair(&raw).ends_with('}'), "repaired output must end with a closing brace");
        // sanitize reports failure instead of panicking
        let _ = sanitize(&raw);
    }

    #[test]
    fn percentage_change_from_zero_is_zero(current in arb_amount()) {
        prop_assert_eq!(percentage_change(current, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn summary_totals_are_consistent(
        transactions in prop::collection::vec(arb_transaction(), 0..40)
    ) {
        let report = summarize(&transactions, as_of());

        prop_assert_eq!(report.basic_stats.total_transactions, transactions.len());

        let volume: Decimal = transactions.iter().map(|t| t.amount).sum();
        prop_assert_eq!(report.transaction_analysis.total_volume, volume);

        let income = &report.basic_stats.income.amount;
        let expense = &report.basic_stats.expense.amount;
        prop_assert_eq!(report.basic_stats.net_flow.amount, *income - *expense);

        let hourly: usize = report.time_analysis.hourly_stats.iter().map(|h| h.transactions).sum();
        prop_assert_eq!(hourly, transactions.len());

        let origins: usize = report.origin_analysis.origins.iter().map(|o| o.value).sum();
        prop_assert_eq!(origins, transactions.len());

        if transactions.is_empty() {
            prop_assert_eq!(report.transaction_analysis.average_transaction, Decimal::ZERO);
            prop_assert!(report.origin_analysis.primary_origin.is_none());
        }
    }

    #[test]
    fn summary_survives_amounts_at_the_decimal_bound(
        base in prop::collection::vec((arb_transaction(), arb_large_amount()), 1..10)
    ) {
        let transactions: Vec<Transaction> = base
            .into_iter()
            .map(|(mut tx, amount)| {
                tx.amount = amount;
                tx
            })
            .collect();

        let report = summarize(&transactions, as_of());

        prop_assert_eq!(report.basic_stats.total_transactions, transactions.len());
        let max = transactions.iter().map(|t| t.amount).max();
        prop_assert_eq!(report.transaction_analysis.max_transaction, max);
    }
}
