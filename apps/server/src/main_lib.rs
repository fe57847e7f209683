use std::sync::Arc;

use crate::config::{Config, LogFormat};
use smsledger_ai::{ExtractionConfig, HttpEntityExtractor};
use smsledger_core::{
    extraction::EntityExtractorTrait,
    transactions::{IngestionConfig, TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use smsledger_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, TransactionRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    /// Whether notifications go through the model path at all.
    pub extraction_enabled: bool,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

fn build_extractor(config: &Config) -> Option<Arc<dyn EntityExtractorTrait>> {
    let api_key = config.llm_api_key.clone()?;
    let mut extraction = ExtractionConfig::new(api_key)
        .with_timeout(config.llm_timeout)
        .with_currency_code(config.currency.as_str());
    if let Some(endpoint) = &config.llm_endpoint {
        extraction = extraction.with_endpoint(endpoint.as_str());
    }
    if let Some(model) = &config.llm_model {
        extraction = extraction.with_model(model.as_str());
    }
    tracing::info!(
        "Model extraction enabled: {} ({})",
        extraction.model,
        extraction.endpoint
    );
    Some(Arc::new(HttpEntityExtractor::new(extraction)))
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));

    let extractor = build_extractor(config);
    if extractor.is_none() {
        tracing::warn!("No LLM API key configured, ingestion uses the heuristic parser only");
    }
    let extraction_enabled = extractor.is_some();

    let ingestion = IngestionConfig {
        currency_code: config.currency.clone(),
        fallback: config.extraction_fallback,
        extraction_deadline: Some(config.llm_timeout),
    };

    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo,
        user_repo,
        extractor,
        ingestion,
    ));

    Ok(Arc::new(AppState {
        user_service,
        transaction_service,
        extraction_enabled,
    }))
}
