//! Public routes: login and active-course browsing

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::{hash_password, Role};
use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

use super::{Course, COURSE_COLUMNS};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub token: String,
}

#[derive(Debug, FromRow)]
struct UserRow {
    email: String,
    role: String,
}

/// Authenticate by email and password digest, answering with a fresh login
/// token. Credential lookup and digest comparison happen in one query, the
/// way the user table is indexed.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Envelope<LoginResponse>> {
    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ))
        }
    };

    let digest = hash_password(&password);

    let user: Option<UserRow> =
        sqlx::query_as("SELECT email, role FROM users WHERE email = $1 AND password = $2")
            .bind(&email)
            .bind(&digest)
            .fetch_optional(&state.pool)
            .await
            .map_err(|err| ApiError::database("Database error", err))?;

    let Some(user) = user else {
        tracing::warn!(email = %email, "login failed: no matching credentials");
        return Err(ApiError::InvalidCredentials);
    };

    let role = Role::parse(&user.role);
    let token = state.jwt_manager.issue_token(&user.email, &role)?;

    tracing::info!(email = %user.email, role = %role.as_str(), "login succeeded");

    Ok(Envelope::success(LoginResponse {
        email: user.email,
        token,
    }))
}

/// List courses that have not started yet.
pub async fn all_active_courses(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<Course>>> {
    let courses: Vec<Course> = sqlx::query_as(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses c WHERE c.start_date > CURRENT_DATE"
    ))
    .fetch_all(&state.pool)
    .await?;

    Ok(Envelope::success(courses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        // Presence is checked in the handler so the response stays an
        // HTTP-200 failure envelope instead of an extractor rejection.
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn test_login_request_field_names() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "password": "pw1"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@x.com"));
        assert_eq!(req.password.as_deref(), Some("pw1"));
    }
}
