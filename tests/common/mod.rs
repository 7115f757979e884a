// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use discgolf_tracker::config::Config;
use discgolf_tracker::db::{RealtimeDb, SqlDb};
use discgolf_tracker::routes::create_router;
use discgolf_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a fresh in-memory relational database.
#[allow(dead_code)]
pub async fn test_db() -> SqlDb {
    SqlDb::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

/// Create a realtime database connection against the emulator.
#[allow(dead_code)]
pub async fn test_realtime() -> RealtimeDb {
    RealtimeDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock realtime database connection (offline).
#[allow(dead_code)]
pub fn test_realtime_offline() -> RealtimeDb {
    RealtimeDb::new_mock()
}

/// Create a test app over a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    let realtime = test_realtime_offline();

    let state = Arc::new(AppState {
        config,
        db,
        realtime,
    });

    (create_router(state.clone()), state)
}

/// Create a JWT accepted by the test app.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: i64, signing_key: &[u8]) -> String {
    discgolf_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create test JWT")
}

/// Build a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Register a user through the API and return their row id.
#[allow(dead_code)]
pub async fn register_user(app: &axum::Router, state: &AppState, name: &str, email: &str) -> i64 {
    use tower::ServiceExt;

    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": "secret1",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/register", None, &body))
        .await
        .unwrap();
    assert!(
        response.status().is_success(),
        "registration of {} failed: {}",
        email,
        response.status()
    );

    state
        .db
        .find_user_by_email(email)
        .await
        .expect("user lookup")
        .expect("registered user exists")
        .id
}
