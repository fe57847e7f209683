//! Merges model-extracted fields and heuristic fields into one record.

use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::Decimal;

use super::currency::CurrencyNormalizer;
use super::transactions_errors::AssemblyError;
use super::transactions_model::{
    present, ExtractedFields, NewTransaction, ParsedSms, RawNotification,
};

/// Builds canonical transactions from the two extraction paths.
///
/// A field the model supplied wins over the heuristic value; a field the
/// model left out falls back to the heuristic value. The direction always
/// comes from the heuristic classification of the raw message, never from
/// the model's own `type`. `amount` is load-bearing: a supplied but
/// unparseable amount, or no amount at all, fails assembly. Fee, tax and
/// balance are best-effort and degrade to zero.
#[derive(Debug, Clone, Default)]
pub struct TransactionAssembler {
    normalizer: CurrencyNormalizer,
}

impl TransactionAssembler {
    pub fn new(normalizer: CurrencyNormalizer) -> Self {
        Self { normalizer }
    }

    /// Assembles a transaction stamped with the current time.
    pub fn assemble(
        &self,
        sanitized: Option<&ExtractedFields>,
        heuristic: &ParsedSms,
        notification: &RawNotification,
        user_id: &str,
    ) -> Result<NewTransaction, AssemblyError> {
        self.assemble_at(sanitized, heuristic, notification, user_id, Utc::now())
    }

    /// Assembles a transaction stamped with `timestamp`.
    pub fn assemble_at(
        &self,
        sanitized: Option<&ExtractedFields>,
        heuristic: &ParsedSms,
        notification: &RawNotification,
        user_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<NewTransaction, AssemblyError> {
        let llm = sanitized.cloned().unwrap_or_default();

        let amount = self.required_amount(llm.amount.as_deref(), heuristic.amount)?;
        let fee = self.optional_amount("fee", llm.fee.as_deref(), heuristic.fee);
        let tax = self.optional_amount("tax", llm.tax.as_deref(), heuristic.tax);
        let balance_after =
            self.optional_amount("balance", llm.balance.as_deref(), heuristic.balance_after);

        Ok(NewTransaction {
            user_id: user_id.to_string(),
            transaction_type: heuristic.transaction_type,
            amount,
            fee,
            tax,
            balance_before: heuristic.balance_before.unwrap_or_default(),
            balance_after,
            date: notification.occurred_at.clone(),
            timestamp,
            sender: pick_text(llm.sender.as_deref(), heuristic.sender.as_deref()),
            receiver: pick_text(llm.receiver.as_deref(), heuristic.receiver.as_deref()),
            transaction_id: pick_text(
                llm.transaction_id.as_deref(),
                heuristic.transaction_id.as_deref(),
            ),
            reference: pick_text(llm.reference.as_deref(), heuristic.reference.as_deref()),
            raw_message: notification.message.clone(),
            origin: notification.origin.to_string(),
        })
    }

    fn required_amount(
        &self,
        supplied: Option<&str>,
        fallback: Option<Decimal>,
    ) -> Result<Decimal, AssemblyError> {
        match supplied.and_then(present) {
            Some(value) => {
                self.normalizer
                    .try_normalize(&value)
                    .map_err(|_| AssemblyError::Unparseable {
                        field: "amount",
                        value,
                    })
            }
            None => fallback.ok_or(AssemblyError::Missing { field: "amount" }),
        }
    }

    fn optional_amount(
        &self,
        field: &'static str,
        supplied: Option<&str>,
        fallback: Option<Decimal>,
    ) -> Decimal {
        match supplied.and_then(present) {
            Some(value) => self.normalizer.try_normalize(&value).unwrap_or_else(|e| {
                warn!("Recording {} as zero: {}", field, e);
                Decimal::ZERO
            }),
            None => fallback.unwrap_or_default(),
        }
    }
}

fn pick_text(supplied: Option<&str>, fallback: Option<&str>) -> String {
    supplied
        .and_then(present)
        .or_else(|| fallback.and_then(present))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{TransactionOrigin, TransactionType};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn notification() -> RawNotification {
        RawNotification {
            message: "Payment received for GHS 50.00 from KWAME MENSAH Current Balance: GHS 150.00".to_string(),
            occurred_at: "2024-06-01".to_string(),
            origin: TransactionOrigin::MobileMoney,
        }
    }

    fn heuristic() -> ParsedSms {
        ParsedSms {
            transaction_type: TransactionType::Credit,
            amount: Some(dec!(50.00)),
            fee: Some(dec!(0.50)),
            tax: None,
            balance_before: Some(dec!(100.00)),
            balance_after: Some(dec!(150.00)),
            sender: Some("KWAME MENSAH".to_string()),
            receiver: None,
            transaction_id: Some("111".to_string()),
            reference: None,
        }
    }

    fn llm_fields() -> ExtractedFields {
        ExtractedFields {
            amount: Some("GHS 55.00".to_string()),
            sender: Some("Kwame Mensah".to_string()),
            receiver: None,
            transaction_id: Some("222".to_string()),
            fee: Some("GHS 0.00".to_string()),
            tax: Some("0".to_string()),
            balance: Some("GHS 155.00".to_string()),
            transaction_type: Some("debit".to_string()),
            reference: Some("rent".to_string()),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_llm_fields_take_precedence() {
        let tx = TransactionAssembler::default()
            .assemble_at(Some(&llm_fields()), &heuristic(), &notification(), "u-1", at())
            .unwrap();

        assert_eq!(tx.amount, dec!(55.00));
        assert_eq!(tx.fee, dec!(0));
        assert_eq!(tx.balance_after, dec!(155.00));
        assert_eq!(tx.sender, "Kwame Mensah");
        assert_eq!(tx.transaction_id, "222");
        assert_eq!(tx.reference, "rent");
    }

    #[test]
    fn test_absent_llm_fields_fall_back_to_heuristic() {
        let fields = ExtractedFields {
            amount: Some("GHS 55.00".to_string()),
            ..Default::default()
        };
        let tx = TransactionAssembler::default()
            .assemble_at(Some(&fields), &heuristic(), &notification(), "u-1", at())
            .unwrap();

        assert_eq!(tx.fee, dec!(0.50));
        assert_eq!(tx.balance_after, dec!(150.00));
        assert_eq!(tx.sender, "KWAME MENSAH");
        assert_eq!(tx.transaction_id, "111");
        assert_eq!(tx.receiver, "");
    }

    #[test]
    fn test_direction_ignores_model_type() {
        let tx = TransactionAssembler::default()
            .assemble_at(Some(&llm_fields()), &heuristic(), &notification(), "u-1", at())
            .unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Credit);
    }

    #[test]
    fn test_unparseable_amount_fails() {
        let fields = ExtractedFields {
            amount: Some("fifty cedis".to_string()),
            ..llm_fields()
        };
        let err = TransactionAssembler::default()
            .assemble_at(Some(&fields), &heuristic(), &notification(), "u-1", at())
            .unwrap_err();
        assert_eq!(err.field(), "amount");
        assert!(matches!(err, AssemblyError::Unparseable { .. }));
    }

    #[test]
    fn test_unparseable_fee_becomes_zero() {
        let fields = ExtractedFields {
            fee: Some("free".to_string()),
            ..llm_fields()
        };
        let tx = TransactionAssembler::default()
            .assemble_at(Some(&fields), &heuristic(), &notification(), "u-1", at())
            .unwrap();
        assert_eq!(tx.fee, Decimal::ZERO);
        assert_eq!(tx.amount, dec!(55.00));
    }

    #[test]
    fn test_heuristic_only_assembly() {
        let tx = TransactionAssembler::default()
            .assemble_at(None, &heuristic(), &notification(), "u-1", at())
            .unwrap();
        assert_eq!(tx.amount, dec!(50.00));
        assert_eq!(tx.balance_before, dec!(100.00));
        assert_eq!(tx.tax, Decimal::ZERO);
    }

    #[test]
    fn test_missing_amount_everywhere_fails() {
        let err = TransactionAssembler::default()
            .assemble_at(None, &ParsedSms::default(), &notification(), "u-1", at())
            .unwrap_err();
        assert_eq!(err, AssemblyError::Missing { field: "amount" });
    }

    #[test]
    fn test_notification_fields_copied_verbatim() {
        let tx = TransactionAssembler::default()
            .assemble_at(None, &heuristic(), &notification(), "u-1", at())
            .unwrap();
        assert_eq!(tx.date, "2024-06-01");
        assert_eq!(tx.origin, "MobileMoney");
        assert_eq!(tx.user_id, "u-1");
        assert_eq!(tx.raw_message, notification().message);
        assert_eq!(tx.timestamp, at());
    }

    #[test]
    fn test_assembly_is_deterministic_apart_from_timestamp() {
        let assembler = TransactionAssembler::default();
        let first = assembler
            .assemble(Some(&llm_fields()), &heuristic(), &notification(), "u-1")
            .unwrap();
        let mut second = assembler
            .assemble(Some(&llm_fields()), &heuristic(), &notification(), "u-1")
            .unwrap();
        second.timestamp = first.timestamp;
        assert_eq!(first, second);
    }
}
