//! Currency-string normalisation.

use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use super::transactions_constants::DEFAULT_CURRENCY_CODE;
use super::transactions_errors::CurrencyError;

/// Parses amounts such as `"GHS 1,234.50"` or `"12.50"` into decimals.
///
/// The currency prefix is matched case-sensitively. Thousands separators
/// and a trailing sentence period are stripped before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyNormalizer {
    prefix: String,
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_CODE)
    }
}

impl CurrencyNormalizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strict parse. Fails on text that is neither prefixed nor numeric, and
    /// on a prefix followed by something that is not a number.
    pub fn try_normalize(&self, text: &str) -> Result<Decimal, CurrencyError> {
        let trimmed = text.trim();
        match trimmed.strip_prefix(self.prefix.as_str()) {
            Some(rest) => parse_number(rest)
                .ok_or_else(|| CurrencyError::InvalidValue(rest.trim().to_string())),
            None => parse_number(trimmed)
                .ok_or_else(|| CurrencyError::InvalidFormat(trimmed.to_string())),
        }
    }

    /// Total parse: anything unparseable becomes zero.
    pub fn normalize(&self, text: &str) -> Decimal {
        self.try_normalize(text).unwrap_or_else(|e| {
            debug!("Normalising '{}' to zero: {}", text, e);
            Decimal::ZERO
        })
    }
}

fn parse_number(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}
