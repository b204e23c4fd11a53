//! Database access layer: pool construction, migrations, models, and
//! repositories for the two coordinator-owned tables (`bookings` and
//! `restaurant_cache`).

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// How long a request-handling task may wait for a pooled connection before
/// the store operation is reported as unavailable.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
///
/// The acquire timeout bounds every store operation's wait for a connection,
/// so a saturated or unreachable database surfaces as an error instead of a
/// hung request.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
