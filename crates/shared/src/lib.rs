//! Shared infrastructure for CourseHub services.
//!
//! Currently this covers database pool construction and migrations; anything
//! that more than one binary needs belongs here.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default connection pool size. The API is request-per-task; ten
/// connections comfortably cover the handful of queries in flight.
const MAX_CONNECTIONS: u32 = 10;

/// Create the application database pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Applying database migrations");
    sqlx::migrate!("../../migrations").run(pool).await
}
