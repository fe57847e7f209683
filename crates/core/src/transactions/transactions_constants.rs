/// Currency code expected in front of amounts in notification text.
pub const DEFAULT_CURRENCY_CODE: &str = "GHS";

/// Sending channel label for mobile-money notifications.
pub const ORIGIN_MOBILE_MONEY: &str = "MobileMoney";

/// Sending channel label for AirtelTigo Money notifications.
pub const ORIGIN_AT_MONEY: &str = "ATMoney";

/// Sending channel label for Fidelity Bank notifications.
pub const ORIGIN_FIDELITY: &str = "Fidelity";

/// Format of the caller-supplied `date` field and of the analytics
/// today/yesterday keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values a model uses to say "no value" for a field.
pub const ABSENT_FIELD_MARKERS: [&str; 5] = ["", "null", "none", "n/a", "nil"];
