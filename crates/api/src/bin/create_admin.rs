//! Seed or reset the administrator account.
//!
//! Idempotent: inserts the admin user if absent, otherwise resets its
//! password and role. Reads `ADMIN_EMAIL` and `ADMIN_PASSWORD` from the
//! environment alongside the usual database configuration.

use anyhow::Context;
use coursehub_api::auth::hash_password;
use coursehub_shared::{create_pool, run_migrations};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@sunbeam.com".to_string());
    let admin_password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;

    let digest = hash_password(&admin_password);

    sqlx::query(
        "INSERT INTO users (email, password, role) VALUES ($1, $2, 'admin') \
         ON CONFLICT (email) DO UPDATE SET password = EXCLUDED.password, role = 'admin'",
    )
    .bind(&admin_email)
    .bind(&digest)
    .execute(&pool)
    .await?;

    tracing::info!(email = %admin_email, "admin account ready");

    Ok(())
}
