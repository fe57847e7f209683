use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use smsledger_core::transactions::{
    IngestTransactionRequest, TransactionHistory, DATE_FORMAT,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{ApiResponse, IngestResponse, TransactionListParams},
};

async fn ingest_transaction(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IngestTransactionRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<IngestResponse>>)> {
    let transaction = state.transaction_service.ingest(&user_id, payload).await?;
    tracing::info!(
        "Ingested {} transaction {} for user {}",
        transaction.transaction_type,
        transaction.id,
        user_id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(IngestResponse {
            message: "Transaction recorded successfully".to_string(),
            transaction,
        })),
    ))
}

async fn list_transactions(
    Path(user_id): Path<String>,
    Query(params): Query<TransactionListParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<TransactionHistory>>> {
    let as_of = match params.as_of.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| ApiError::BadRequest(format!("invalid asOf '{}': {}", raw, e)))?,
        None => Utc::now().date_naive(),
    };
    let history = state
        .transaction_service
        .get_transactions(&user_id, params.query(), as_of)?;
    Ok(Json(ApiResponse::ok(history)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/transactions",
        get(list_transactions).post(ingest_transaction),
    )
}
