#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use qabank_api::background::backup::BackupConfig;
use qabank_api::config::{LogFormat, ServerConfig};
use qabank_api::router::build_app_router;
use qabank_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin, writes exports into
/// `export_dir`, and points the backup source and directory inside it.
pub fn test_config(export_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        database_url: "sqlite::memory:".to_string(),
        export_dir: export_dir.to_path_buf(),
        backup: BackupConfig {
            source_path: export_dir.join("qa.db"),
            backup_dir: export_dir.join("backups"),
            name_prefix: "qa".to_string(),
            extension: "db".to_string(),
            interval: Duration::from_secs(24 * 3600),
            tick: Duration::from_secs(60),
        },
        log_format: LogFormat::Text,
    }
}

/// Build the full application router, exactly as `main.rs` does, using the
/// given database pool and export directory.
pub fn build_test_app_with_exports(pool: SqlitePool, export_dir: &Path) -> Router {
    let config = test_config(export_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

/// Build the router for tests that never export.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_exports(pool, &std::env::temp_dir().join("qabank-test-exports"))
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(pool: &SqlitePool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/categories/",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), 200, "creating category {name}");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Submit a QA item through the API and return its id.
pub async fn submit_qa(pool: &SqlitePool, question: &str, answer: &str, category: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/qa/submit_qa/",
        serde_json::json!({ "question": question, "answer": answer, "category": category }),
    )
    .await;
    assert_eq!(response.status(), 200, "submitting {question}");
    body_json(response).await["id"].as_i64().unwrap()
}
