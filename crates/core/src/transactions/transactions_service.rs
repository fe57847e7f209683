use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};

use super::assembler::TransactionAssembler;
use super::currency::CurrencyNormalizer;
use super::sanitizer::sanitize;
use super::sms_parser::SmsParser;
use super::transactions_constants::DEFAULT_CURRENCY_CODE;
use super::transactions_model::{
    ExtractedFields, IngestTransactionRequest, RawNotification, Transaction, TransactionFilter,
    TransactionHistory, TransactionQuery, TransactionType,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::analytics::summarize;
use crate::errors::{Result, ValidationError};
use crate::extraction::{EntityExtractorTrait, ExtractionError};
use crate::users::UserRepositoryTrait;

/// What ingestion does when the model path fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Extraction or sanitization failure fails the ingestion.
    #[default]
    Strict,
    /// The failure is logged and the heuristic record is used alone.
    HeuristicOnFailure,
}

/// Settings for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    pub currency_code: String,
    pub fallback: FallbackPolicy,
    /// Upper bound on one extractor call. `None` leaves it to the extractor.
    pub extraction_deadline: Option<Duration>,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            fallback: FallbackPolicy::default(),
            extraction_deadline: None,
        }
    }
}

/// Service for ingesting notifications and querying transaction histories.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    extractor: Option<Arc<dyn EntityExtractorTrait>>,
    parser: SmsParser,
    assembler: TransactionAssembler,
    config: IngestionConfig,
}

impl TransactionService {
    /// Without an `extractor` every notification goes through the heuristic
    /// parser alone.
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        extractor: Option<Arc<dyn EntityExtractorTrait>>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            transaction_repository,
            user_repository,
            extractor,
            parser: SmsParser::new(&config.currency_code),
            assembler: TransactionAssembler::new(CurrencyNormalizer::new(
                config.currency_code.as_str(),
            )),
            config,
        }
    }

    /// Model-extracted fields for `message`, or `None` when the model path
    /// is disabled or failed under a tolerant policy.
    async fn extract_fields(&self, message: &str) -> Result<Option<ExtractedFields>> {
        let Some(extractor) = self.extractor.as_deref() else {
            debug!("No extractor configured, using heuristic parse only");
            return Ok(None);
        };

        match self.run_extractor(extractor, message).await {
            Ok(fields) => Ok(Some(fields)),
            Err(e) => match self.config.fallback {
                FallbackPolicy::Strict => Err(e),
                FallbackPolicy::HeuristicOnFailure => {
                    warn!(
                        "Extractor '{}' failed, falling back to heuristic parse: {}",
                        extractor.id(),
                        e
                    );
                    Ok(None)
                }
            },
        }
    }

    async fn run_extractor(
        &self,
        extractor: &dyn EntityExtractorTrait,
        message: &str,
    ) -> Result<ExtractedFields> {
        let call = extractor.extract(message);
        let response = match self.config.extraction_deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| ExtractionError::timeout(deadline))??,
            None => call.await?,
        };

        let content = response.first_content()?;
        debug!("Extractor '{}' returned {} bytes", extractor.id(), content.len());
        Ok(sanitize(content)?)
    }

    fn ensure_user(&self, user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.user_repository.get_by_id(user_id).map(|_| ())
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn ingest(
        &self,
        user_id: &str,
        request: IngestTransactionRequest,
    ) -> Result<Transaction> {
        let notification = RawNotification::new(&request.message, &request.time, &request.sender)?;
        self.ensure_user(user_id)?;

        let heuristic = self.parser.parse(&notification.message);
        let sanitized = self.extract_fields(&notification.message).await?;
        let new_transaction =
            self.assembler
                .assemble(sanitized.as_ref(), &heuristic, &notification, user_id)?;

        let transaction = self.transaction_repository.insert(new_transaction).await?;
        debug!(
            "Recorded {} transaction {} for user {}",
            transaction.transaction_type, transaction.id, user_id
        );
        Ok(transaction)
    }

    fn get_transactions(
        &self,
        user_id: &str,
        query: TransactionQuery,
        as_of: NaiveDate,
    ) -> Result<TransactionHistory> {
        self.ensure_user(user_id)?;

        let mut filter = TransactionFilter::for_user(user_id);
        filter.transaction_type = query
            .transaction_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<TransactionType>)
            .transpose()?;
        filter.date = query
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let transactions = self.transaction_repository.list(&filter)?;
        let analytics = summarize(&transactions, as_of);
        Ok(TransactionHistory {
            transactions,
            analytics,
        })
    }

    fn count_transactions(&self, user_id: &str) -> Result<i64> {
        self.ensure_user(user_id)?;
        self.transaction_repository.count_for_user(user_id)
    }
}
