//! Liveness and readiness endpoints. Both are unauthenticated.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use bistro_events::notifier::MetricsSnapshot;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// Readiness response payload, including notification pipeline counters.
#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub notifications: MetricsSnapshot,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = bistro_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /ready -- 200 when the database answers, 503 otherwise.
///
/// The body also exposes the notification counters so a dropped-message
/// burst is visible without a metrics stack.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let notifications = state.notifier.metrics();

    match bistro_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready",
                notifications,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "unavailable",
                    notifications,
                }),
            )
        }
    }
}

/// Mount health routes (root-level, outside authentication).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready))
}
