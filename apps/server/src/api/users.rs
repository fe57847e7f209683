use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use smsledger_core::users::{NewUser, User};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, UserDetails},
};

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<UserDetails>>> {
    let user = state.user_service.get_user(&user_id)?;
    let transaction_count = state.transaction_service.count_transactions(&user_id)?;
    Ok(Json(ApiResponse::ok(UserDetails {
        user,
        transaction_count,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
}
