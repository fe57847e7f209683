use std::{net::SocketAddr, time::Duration};

use smsledger_core::transactions::{FallbackPolicy, DEFAULT_CURRENCY_CODE};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub llm_endpoint: Option<String>,
    pub llm_model: Option<String>,
    /// `None` disables the model path; ingestion then uses the heuristic parser alone.
    pub llm_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub extraction_fallback: FallbackPolicy,
    pub currency: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SMSLEDGER_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid SMSLEDGER_LISTEN_ADDR");
        let db_path = std::env::var("SMSLEDGER_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("SMSLEDGER_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let llm_api_key = non_empty_var("SMSLEDGER_LLM_API_KEY")
            .or_else(|| non_empty_var("HUGGING_FACE_API"));

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(millis_var("SMSLEDGER_REQUEST_TIMEOUT_MS", 60_000)),
            llm_endpoint: non_empty_var("SMSLEDGER_LLM_ENDPOINT"),
            llm_model: non_empty_var("SMSLEDGER_LLM_MODEL"),
            llm_api_key,
            llm_timeout: Duration::from_millis(millis_var("SMSLEDGER_LLM_TIMEOUT_MS", 30_000)),
            extraction_fallback: parse_fallback(
                &std::env::var("SMSLEDGER_EXTRACTION_FALLBACK").unwrap_or_default(),
            ),
            currency: non_empty_var("SMSLEDGER_CURRENCY")
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string()),
            log_format: parse_log_format(
                &std::env::var("SMSLEDGER_LOG_FORMAT").unwrap_or_default(),
            ),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn millis_var(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// `heuristic` enables the fallback; anything else is strict.
pub fn parse_fallback(value: &str) -> FallbackPolicy {
    match value.trim().to_ascii_lowercase().as_str() {
        "heuristic" | "heuristic_on_failure" => FallbackPolicy::HeuristicOnFailure,
        _ => FallbackPolicy::Strict,
    }
}

pub fn parse_log_format(value: &str) -> LogFormat {
    if value.trim().eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}
