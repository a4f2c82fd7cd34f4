use crate::config::Config;
use crate::db::Database;
use crate::state::AppState;
use axum::{body::Body, http::Request, response::Response, Router};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Fresh database in its own temp directory; keep the `TempDir` alive for the test
pub async fn test_database() -> (Database, TempDir) {
    let (state, dir) = test_state().await;
    (state.db, dir)
}

pub async fn test_state() -> (AppState, TempDir) {
    test_state_with_pool(2).await
}

pub async fn test_state_with_pool(db_max_connections: u32) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config {
        db_uri: format!("sqlite://{}", dir.path().join("test.db").display()),
        db_max_connections,
        db_seed: false,
        service_port: 5555,
        service_host: "127.0.0.1".to_string(),
    };

    let db = Database::from_config(&config)
        .await
        .expect("Failed to open test database");

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    (state, dir)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
