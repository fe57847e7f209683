//! Instruction text sent to the text-generation service.

/// Phrases the model is told indicate money leaving the account.
const DEBIT_HINTS: &[&str] = &[
    "Payment made to",
    "You paid",
    "Cash Out",
    "Transfer to",
    "Withdrawal",
    "Purchase",
    "You bought",
    "You sent",
    "Debited",
];

/// Phrases the model is told indicate money entering the account.
const CREDIT_HINTS: &[&str] = &[
    "Payment received",
    "You received",
    "Cash In",
    "Transfer from",
    "Deposit",
    "Credited",
    "Sent you",
    "Payment from",
];

/// Keys of the JSON object the model must return, in template order.
pub const OUTPUT_FIELDS: &[&str] = &[
    "amount",
    "sender",
    "receiver",
    "transaction_id",
    "fee",
    "tax",
    "balance",
    "type",
    "reference",
];

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("   - \"{}\"", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn output_template() -> String {
    let body = OUTPUT_FIELDS
        .iter()
        .map(|field| format!("  \"{}\": \"value\"", field))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{}\n}}", body)
}

/// Builds the extraction instruction for one SMS.
///
/// The message is embedded verbatim (double quotes escaped) together with
/// the direction rules and the strict output schema.
pub fn build_extraction_prompt(message: &str, currency_code: &str) -> String {
    let escaped = message.replace('"', "\\\"");
    format!(
        "Extract the following details from the given SMS message and output strictly in JSON format with key-value pairs.\n\
Pay special attention to the transaction type classification rules below:\n\n\
Transaction Type Classification Rules:\n\
1. DEBIT transactions (money going out) are indicated by phrases like:\n{debit}\n\n\
2. CREDIT transactions (money coming in) are indicated by phrases like:\n{credit}\n\n\
3. Default Rules:\n\
   - If the message indicates money leaving the account, it's a \"debit\"\n\
   - If the message indicates money entering the account, it's a \"credit\"\n\
   - If unclear, look for keywords indicating direction of money flow\n\n\
Extract these fields:\n\
- Amount (e.g., {code} 10.00)\n\
- Sender (who the money is from)\n\
- Receiver (who the money is sent to)\n\
- Transaction ID (e.g., 12345678911)\n\
- Fee (if any)\n\
- Tax (if any)\n\
- Balance (Current balance if mentioned else Available balance)\n\
- Type (must be either \"credit\" or \"debit\" based on the rules above)\n\
- Reference (any ref or reference if available)\n\n\
Do not include any explanation, only return the JSON.\n\n\
SMS Message: \"{message}\"\n\n\
Output Format:\n{template}\n",
        debit = bullet_list(DEBIT_HINTS),
        credit = bullet_list(CREDIT_HINTS),
        code = currency_code,
        message = escaped,
        template = output_template(),
    )
}
