//! User data and health API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::TestContext;

#[tokio::test]
async fn test_save_creates_then_updates() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let first = server
        .post("/api/save-data")
        .json(&json!({ "type": "favorites", "data": ["밥"], "userId": "u1" }))
        .await;
    first.assert_status_ok();
    assert_eq!(first.json::<Value>()["outcome"], "created");

    let created = ctx.store_data("u1", "favorites").await;

    let second = server
        .post("/api/save-data")
        .json(&json!({ "type": "favorites", "data": ["밥", "물"], "userId": "u1" }))
        .await;
    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["outcome"], "updated");

    let updated = ctx.store_data("u1", "favorites").await;
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.data, json!(["밥", "물"]));
}

#[tokio::test]
async fn test_load_returns_data_and_metadata() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/save-data")
        .json(&json!({ "type": "settings", "data": { "voice": true } }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/load-data")
        .add_query_param("type", "settings")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({ "voice": true }));
    assert_eq!(body["metadata"]["type"], "settings");
    assert_eq!(body["metadata"]["dataSize"], r#"{"voice":true}"#.len());
    assert!(body["metadata"]["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_load_missing_is_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/load-data")
        .add_query_param("type", "settings")
        .add_query_param("userId", "nobody")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_without_type_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/save-data")
        .json(&json!({ "data": [1, 2, 3] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(ctx.store.writes(), 0);
}

#[tokio::test]
async fn test_health_reports_store_and_ai() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["aiConfigured"], false);

    let ctx = TestContext::with_generator("ok");
    let body: Value = ctx.server().get("/api/health").await.json();
    assert_eq!(body["aiConfigured"], true);
}
