use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use smsledger_core::transactions::FallbackPolicy;
use smsledger_server::{
    api::app_router,
    build_state,
    config::{Config, LogFormat},
};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const RECEIVED: &str = "Payment received for GHS 50.00 from KWAME MENSAH Current Balance: GHS 150.00 . Available Balance: GHS 150.00. Reference: rent. Transaction ID: 48213377901.";
const SENT: &str = "Payment made for GHS 20.00 to AMA SERWAA. Fee charged: GHS 0.20 Tax Charged: 0.03. Transaction ID: 51002. Current Balance: GHS 129.80";

fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        llm_endpoint: None,
        llm_model: None,
        llm_api_key: None,
        llm_timeout: Duration::from_secs(5),
        extraction_fallback: FallbackPolicy::Strict,
        currency: "GHS".to_string(),
        log_format: LogFormat::Text,
    }
}

async fn test_app(tmp: &TempDir) -> Router {
    let config = test_config(tmp);
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_user(app: &Router, id: &str) {
    let (status, _) = send(app, "POST", "/api/v1/users", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn ingest(app: &Router, user_id: &str, message: &str, time: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/api/v1/users/{}/transactions", user_id),
        Some(json!({ "message": message, "time": time, "sender": "MobileMoney" })),
    )
    .await
}

#[tokio::test]
async fn healthz_reports_heuristic_mode_without_api_key() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;

    let (status, body) = send(&app, "GET", "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["extraction"], "heuristic");
}

#[tokio::test]
async fn creates_and_fetches_user() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/users",
        Some(json!({ "id": "u-1", "currency": "GHS" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], "u-1");

    let (status, body) = send(&app, "GET", "/api/v1/users/u-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["currency"], "GHS");
    assert_eq!(body["data"]["transactionCount"], 0);

    let (status, body) = send(&app, "GET", "/api/v1/users/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn ingests_notification_with_heuristic_parser() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;
    create_user(&app, "u-1").await;

    let (status, body) = ingest(&app, "u-1", RECEIVED, "2024-06-01").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "Transaction recorded successfully");

    let tx = &body["data"]["transaction"];
    assert_eq!(tx["type"], "credit");
    assert_eq!(tx["amount"].as_f64(), Some(50.0));
    assert_eq!(tx["balanceAfter"].as_f64(), Some(150.0));
    assert_eq!(tx["sender"], "KWAME MENSAH");
    assert_eq!(tx["transactionId"], "48213377901");
    assert_eq!(tx["date"], "2024-06-01");
    assert_eq!(tx["origin"], "MobileMoney");
    assert_eq!(tx["userId"], "u-1");

    let (_, body) = send(&app, "GET", "/api/v1/users/u-1", None).await;
    assert_eq!(body["data"]["transactionCount"], 1);
}

#[tokio::test]
async fn lists_transactions_with_analytics() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;
    create_user(&app, "u-1").await;

    assert_eq!(ingest(&app, "u-1", RECEIVED, "2024-06-01").await.0, StatusCode::CREATED);
    assert_eq!(ingest(&app, "u-1", SENT, "2024-06-02").await.0, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/users/u-1/transactions?asOf=2024-06-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["transactions"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["basicStats"]["totalTransactions"], 2);
    assert_eq!(data["basicStats"]["netFlow"]["amount"].as_f64(), Some(30.0));
    // today -20 against yesterday 50
    assert_eq!(
        data["basicStats"]["netFlow"]["percentageChange"].as_f64(),
        Some(-140.0)
    );
    assert_eq!(data["transactionAnalysis"]["totalVolume"].as_f64(), Some(70.0));
    assert_eq!(data["transactionAnalysis"]["totalFees"].as_f64(), Some(0.2));
    assert_eq!(data["userAnalysis"]["uniqueUsers"], 2);
    assert_eq!(data["originAnalysis"]["primaryOrigin"], "MobileMoney");

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/users/u-1/transactions?type=debit",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let transactions = body["data"]["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["type"], "debit");

    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/users/u-1/transactions?date=2024-06-01",
        None,
    )
    .await;
    assert_eq!(body["data"]["transactions"].as_array().map(Vec::len), Some(1));

    // the earliest representable date has no predecessor
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/users/u-1/transactions?asOf=-262143-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["basicStats"]["totalTransactions"], 2);
}

#[tokio::test]
async fn rejects_invalid_requests() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;
    create_user(&app, "u-1").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users/u-1/transactions",
        Some(json!({ "message": RECEIVED, "time": "2024-06-01", "sender": "PigeonPost" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ingest(&app, "ghost", RECEIVED, "2024-06-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/v1/users/u-1/transactions?type=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/users/u-1/transactions?asOf=June", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ingest(&app, "u-1", "Your bundle has been activated", "2024-06-01").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn history_with_amounts_at_the_decimal_bound_still_summarizes() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp).await;
    create_user(&app, "u-1").await;

    let message = "You paid GHS 50,000,000,000,000,000,000,000,000,000 to KOFI ASANTE Transaction ID: 9001";
    for _ in 0..2 {
        let (status, body) = ingest(&app, "u-1", message, "2024-06-01").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["transaction"]["type"], "debit");
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/users/u-1/transactions?asOf=2024-06-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["basicStats"]["totalTransactions"], 2);
}
