use std::sync::Arc;

use bistro_events::NotificationPublisher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bistro_db::DbPool,
    /// Server configuration (JWT verification reads the secret from here).
    pub config: Arc<ServerConfig>,
    /// Fire-and-forget handle onto the notification queue.
    pub notifier: NotificationPublisher,
}
