//! Application configuration
//!
//! All configuration is loaded once at startup from the environment (with
//! `.env` support via dotenvy in `main`). The JWT signing secret lives here
//! and is injected through [`crate::state::AppState`]; nothing reads it from
//! ambient globals after startup.

use anyhow::Context;

/// Process-wide configuration, read-only after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Postgres connection string.
    pub database_url: String,
    /// Shared secret for signing login tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours. Every issued token expires.
    pub jwt_expiry_hours: i64,
    /// Initial password assigned to users created through course
    /// registration (stored as its digest).
    pub default_student_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
    /// default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:4000".to_string());

        let jwt_expiry_hours = std::env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let default_student_password = std::env::var("DEFAULT_STUDENT_PASSWORD")
            .unwrap_or_else(|_| "Sunbeam".to_string());

        Ok(Self {
            bind_address,
            database_url,
            jwt_secret,
            jwt_expiry_hours,
            default_student_password,
        })
    }
}
