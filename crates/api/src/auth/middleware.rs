//! Authentication middleware for Axum
//!
//! Two gates protect the routing tree: [`require_auth`] verifies the login
//! token and attaches the caller's identity to the request, and
//! [`require_admin`] restricts a subtree to administrators. Gate failures
//! answer with the uniform failure envelope at HTTP 200, like every other
//! outcome in the API.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::response::Envelope;

use super::jwt::JwtManager;
use super::role::Role;

/// Header the client sends its login token in. This predates the service
/// and is NOT the bearer-authorization convention; existing clients depend
/// on it.
pub const TOKEN_HEADER: &str = "token";

/// Path (inside the students subtree, after prefix stripping) that must stay
/// reachable without a token: self-registration creates the user account.
const REGISTRATION_PATH: &str = "/student/register-to-course";

/// Authenticated caller identity extracted from the token, attached to the
/// request extensions for handlers downstream.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub role: Role,
}

/// State needed for authentication
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token is missing")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("You need permission to access this path")]
    PermissionDenied,
    #[error("Error in token")]
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Envelope::<()>::failure(self.to_string()).into_response()
    }
}

fn extract_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}

/// Middleware that requires a valid login token.
///
/// The registration endpoint is allow-listed straight through the gate; it
/// is the one path under `/students` a brand-new visitor must reach.
pub async fn require_auth(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if path == REGISTRATION_PATH {
        return next.run(request).await;
    }

    let Some(token) = extract_token(&request) else {
        tracing::warn!(path = %path, "require_auth: no token header");
        return AuthError::MissingToken.into_response();
    };

    match auth_state.jwt_manager.verify_token(&token) {
        Ok(claims) => {
            let user = CurrentUser {
                email: claims.sub,
                role: Role::parse(&claims.role),
            };
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "require_auth: token rejected");
            err.into_response()
        }
    }
}

/// Middleware that requires the admin role.
///
/// Runs after [`require_auth`], which is responsible for attaching the
/// [`CurrentUser`] extension.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<CurrentUser>() {
        Some(user) if user.role.is_admin() => next.run(request).await,
        Some(user) => {
            tracing::warn!(
                email = %user.email,
                role = %user.role.as_str(),
                path = %request.uri().path(),
                "require_admin: non-admin access attempt"
            );
            AuthError::PermissionDenied.into_response()
        }
        None => AuthError::MissingToken.into_response(),
    }
}
