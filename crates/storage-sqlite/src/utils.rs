//! Helpers shared by the SQLite models.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal, falling back to scientific notation and
/// finally to zero.
///
/// Monetary columns are stored as text; a corrupt value degrades the row
/// rather than failing the whole query.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value_str)
        .or_else(|_| Decimal::from_scientific(value_str))
        .unwrap_or_else(|e| {
            log::error!(
                "Failed to parse {} '{}' as Decimal ({}). Falling back to ZERO.",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        })
}
