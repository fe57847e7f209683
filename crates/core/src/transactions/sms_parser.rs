//! Regex-driven extraction of transaction fields straight from SMS text.
//!
//! Every field is matched independently. A pattern that does not match
//! leaves its field unset; the parser never fails and never calls out.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::currency::CurrencyNormalizer;
use super::direction::classify_direction;
use super::transactions_constants::DEFAULT_CURRENCY_CODE;
use super::transactions_model::ParsedSms;

/// A number with optional thousands separators and decimals.
const NUMBER: &str = r"(\d[\d,]*(?:\.\d+)?)";

lazy_static! {
    static ref TRANSACTION_ID_REGEX: Regex = Regex::new(
        r"(?i)\b(?:Financial\s+)?Transaction\s+Id\s*:?\s*([A-Za-z0-9]*\d[A-Za-z0-9]*)"
    )
    .expect("Invalid regex pattern");

    /// Party after "from"/"to", up to the balance, reference or id label.
    static ref SENDER_REGEX: Regex = Regex::new(
        r"(?i)\b(?:from|to)\s+(.+?)\s*(?:Current Balance|Reference|Transaction ID)"
    )
    .expect("Invalid regex pattern");

    /// Party after "to"/"for", up to the fee, balance or transaction label.
    static ref RECEIVER_REGEX: Regex = Regex::new(
        r"(?i)\b(?:to|for)\s+(.+?)\s*(?:Fee|Balance|Transaction)"
    )
    .expect("Invalid regex pattern");

    static ref REFERENCE_REGEX: Regex =
        Regex::new(r"(?i)\b(?:Reference|Ref)\b\s*:?\s*([^\n]+)").expect("Invalid regex pattern");
}

/// Heuristic SMS parser for one currency.
#[derive(Debug, Clone)]
pub struct SmsParser {
    normalizer: CurrencyNormalizer,
    amount: Regex,
    fee: Regex,
    tax: Regex,
    balance_before: Regex,
    balance_after: Regex,
}

impl Default for SmsParser {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_CODE)
    }
}

impl SmsParser {
    /// Builds the currency-bearing patterns for `currency_code`.
    pub fn new(currency_code: &str) -> Self {
        let code = regex::escape(currency_code);
        let build = |pattern: String| Regex::new(&pattern).expect("Invalid regex pattern");

        Self {
            normalizer: CurrencyNormalizer::new(currency_code),
            amount: build(format!(r"(?i)\b{code}\s*{NUMBER}")),
            fee: build(format!(r"(?i)\bFee(?:\s+charged)?\s*:?\s*{code}\s*{NUMBER}")),
            tax: build(format!(r"(?i)\bTax\s+Charged\s*:?\s*(?:{code}\s*)?{NUMBER}")),
            balance_before: build(format!(r"(?i)\bAvailable\s+Balance\s*:?\s*{code}\s*{NUMBER}")),
            balance_after: build(format!(r"(?i)\bCurrent\s+Balance\s*:?\s*{code}\s*{NUMBER}")),
        }
    }

    /// Extracts whatever fields the message exposes.
    pub fn parse(&self, message: &str) -> ParsedSms {
        let message = message.trim();

        ParsedSms {
            transaction_type: classify_direction(message),
            amount: self.capture_amount(&self.amount, message),
            fee: self.capture_amount(&self.fee, message),
            tax: self.capture_amount(&self.tax, message),
            balance_before: self.capture_amount(&self.balance_before, message),
            balance_after: self.capture_amount(&self.balance_after, message),
            sender: capture_text(&SENDER_REGEX, message),
            receiver: capture_text(&RECEIVER_REGEX, message),
            transaction_id: capture_text(&TRANSACTION_ID_REGEX, message),
            reference: capture_text(&REFERENCE_REGEX, message),
        }
    }

    fn capture_amount(&self, pattern: &Regex, message: &str) -> Option<Decimal> {
        let raw = pattern.captures(message)?.get(1)?.as_str();
        self.normalizer.try_normalize(raw).ok()
    }
}

fn capture_text(pattern: &Regex, message: &str) -> Option<String> {
    let raw = pattern.captures(message)?.get(1)?.as_str();
    let cleaned = raw
        .trim()
        .trim_end_matches(['.', ',', ':', ';'])
        .trim_end();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
