use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::main_lib::AppState;

pub async fn healthz(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "extraction": if state.extraction_enabled { "model" } else { "heuristic" },
    }))
}
