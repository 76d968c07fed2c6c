//! API error taxonomy
//!
//! All errors collapse into the HTTP-200 failure envelope at the handler
//! boundary; nothing propagates as a transport-level error status. Database
//! errors are logged with their source but surface only a short message.

use axum::response::{IntoResponse, Response};

use crate::auth::AuthError;
use crate::response::Envelope;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required field is missing or malformed at the presence level.
    #[error("{0}")]
    Validation(String),

    /// Login with an unknown email or a non-matching password digest.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing/invalid token or insufficient role.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Query failure or constraint violation. `message` is what the client
    /// sees; `source` goes to the log.
    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Database error with a caller-chosen client-facing message.
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(source: sqlx::Error) -> Self {
        Self::database("Database error", source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database { message, source } => {
                tracing::error!(error = ?source, message = %message, "database query failed");
            }
            ApiError::Auth(err) => {
                tracing::warn!(error = %err, "request rejected by auth");
            }
            _ => {}
        }

        Envelope::<()>::failure(self.to_string()).into_response()
    }
}
