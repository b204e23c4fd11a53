//! Shared helpers for API integration tests.
//!
//! [`build_test_app`] mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (request ID, timeout, tracing, panic
//! recovery) that production uses, with the notification publisher swapped
//! for a detached in-process buffer.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::PgPool;
use tokio::sync::mpsc;
use tower::ServiceExt;

use bistro_api::auth::jwt::{Claims, JwtConfig};
use bistro_api::config::ServerConfig;
use bistro_api::router::build_app_router;
use bistro_api::state::AppState;
use bistro_events::NotificationPublisher;

/// Secret the test apps verify tokens against.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router backed by a detached notification
/// buffer whose receiver is dropped immediately.
///
/// With the receiver gone every notification counts as dropped, which is
/// exactly the fire-and-forget contract: bookings must succeed anyway.
pub fn build_test_app(pool: PgPool) -> Router {
    let (app, _rx) = build_test_app_with_notifications(pool);
    app
}

/// Like [`build_test_app`], but hands back the notification buffer receiver
/// so tests can assert on the payloads a booking enqueues.
pub fn build_test_app_with_notifications(pool: PgPool) -> (Router, mpsc::Receiver<Vec<u8>>) {
    let config = test_config();
    let (notifier, rx) = NotificationPublisher::detached(8);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier,
    };

    (build_app_router(state, &config), rx)
}

// ---------------------------------------------------------------------------
// Token minting
// ---------------------------------------------------------------------------

/// Sign an HS256 token for `sub`, valid for 15 minutes.
pub fn mint_token(sub: &str) -> String {
    mint_token_with_secret(sub, TEST_JWT_SECRET)
}

/// Sign an HS256 token for `sub` with an arbitrary secret.
pub fn mint_token_with_secret(sub: &str, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now,
        exp: now + 900,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Sign a token that expired well past the validation leeway.
pub fn mint_expired_token(sub: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now - 600,
        exp: now - 300,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
