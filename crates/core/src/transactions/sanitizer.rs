//! Repair of the text-generation service's JSON output.
//!
//! Model output is treated as untrusted text. Each repair step is a pure
//! text transform; `repair` applies them in a fixed order and `sanitize`
//! parses the result.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::transactions_errors::SanitizationError;
use super::transactions_model::ExtractedFields;

/// Token sequence the model emits in place of nested fields.
const CONTAMINATION_TOKEN: &str = ".deep array";

lazy_static! {
    /// A receiver value that ran on into the balance narrative.
    static ref RECEIVER_OVERFLOW_REGEX: Regex =
        Regex::new(r#""receiver":\s*"(.*?)\s*Current Balance:.*?""#)
            .expect("Invalid regex pattern");
}

type RepairStep = fn(&str) -> String;

/// Repair steps in application order. Each step sees the previous output.
const REPAIR_STEPS: &[(&str, RepairStep)] = &[
    ("escaped_newlines", remove_escaped_newlines),
    ("contamination", remove_contamination),
    ("code_fences", strip_code_fences),
    ("close_object", close_truncated_object),
    ("receiver_overflow", trim_receiver_overflow),
];

/// Removes literal `\n` escape sequences (backslash followed by `n`).
pub fn remove_escaped_newlines(text: &str) -> String {
    text.replace("\\n", "")
}

/// Removes the nested-field contamination token.
pub fn remove_contamination(text: &str) -> String {
    text.replace(CONTAMINATION_TOKEN, "")
}

/// Drops Markdown code fences and any prose before the first `{`.
pub fn strip_code_fences(text: &str) -> String {
    let unfenced = text.replace("```json", "").replace("```", "");
    match unfenced.find('{') {
        Some(start) => unfenced[start..].trim().to_string(),
        None => unfenced.trim().to_string(),
    }
}

/// Appends a closing brace when the output was cut off before it.
pub fn close_truncated_object(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.ends_with('}') {
        trimmed.to_string()
    } else {
        format!("{}}}", trimmed)
    }
}

/// Rewrites `"receiver": "<name> Current Balance: ..."` to `"receiver": "<name>"`.
pub fn trim_receiver_overflow(text: &str) -> String {
    RECEIVER_OVERFLOW_REGEX
        .replace_all(text, r#""receiver": "${1}""#)
        .into_owned()
}

/// Applies every repair step in order.
pub fn repair(raw: &str) -> String {
    REPAIR_STEPS
        .iter()
        .fold(raw.to_string(), |text, (_, step)| step(&text))
}

/// Repairs `raw` and parses it into extracted fields.
///
/// On failure the error carries the cleaned text; no field is guessed.
pub fn sanitize(raw: &str) -> Result<ExtractedFields, SanitizationError> {
    let cleaned = repair(raw);
    debug!("Sanitized extraction output: {}", cleaned);

    serde_json::from_str::<ExtractedFields>(&cleaned).map_err(|e| SanitizationError {
        message: e.to_string(),
        cleaned,
    })
}
