//! Student routes: registration, password change, and enrolled-content
//! listings
//!
//! Everything except registration runs behind the access gate and reads the
//! caller's email from the attached identity, never from the request body.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use crate::auth::{hash_password, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

use super::{Course, COURSE_COLUMNS};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub course_id: Option<i32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
}

/// Register a visitor for a course.
///
/// The whole sequence — user lookup, role promotion or account creation,
/// student insert — runs in one transaction, so a failure in any step
/// leaves no partial rows behind. Two concurrent first-time registrations
/// for the same email can still race to the insert; the loser surfaces as a
/// registration failure.
pub async fn register_to_course(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let (course_id, email, name, mobile_no) = match (req.course_id, req.email, req.name, req.mobile_no)
    {
        (Some(course_id), Some(email), Some(name), Some(mobile_no))
            if !email.is_empty() && !name.is_empty() && !mobile_no.is_empty() =>
        {
            (course_id, email, name, mobile_no)
        }
        _ => {
            return Err(ApiError::Validation(
                "All fields are required".to_string(),
            ))
        }
    };

    let mut tx = state.pool.begin().await?;

    let existing: Option<(String,)> = sqlx::query_as("SELECT email FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| ApiError::database("Database error", err))?;

    if existing.is_some() {
        // Known user registering for another course: promote to student,
        // never create a second user row.
        sqlx::query("UPDATE users SET role = 'student' WHERE email = $1")
            .bind(&email)
            .execute(&mut *tx)
            .await
            .map_err(|err| ApiError::database("User update failed", err))?;
    } else {
        let digest = hash_password(&state.config.default_student_password);

        sqlx::query("INSERT INTO users (email, password, role) VALUES ($1, $2, 'student')")
            .bind(&email)
            .bind(&digest)
            .execute(&mut *tx)
            .await
            .map_err(|err| ApiError::database("User creation failed", err))?;
    }

    sqlx::query("INSERT INTO students (name, email, course_id, mobile_no) VALUES ($1, $2, $3, $4)")
        .bind(&name)
        .bind(&email)
        .bind(course_id)
        .bind(&mobile_no)
        .execute(&mut *tx)
        .await
        .map_err(|err| ApiError::database("Student registration failed", err))?;

    tx.commit().await?;

    tracing::info!(email = %email, course_id = course_id, "student registered");

    Ok(Envelope::success("Student registered successfully"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Update the caller's password to the digest of the new value.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let (new_password, confirm_password) = match (req.new_password, req.confirm_password) {
        (Some(new_password), Some(confirm_password)) if !new_password.is_empty() => {
            (new_password, confirm_password)
        }
        _ => {
            return Err(ApiError::Validation(
                "New password and confirmation are required".to_string(),
            ))
        }
    };

    if new_password != confirm_password {
        return Err(ApiError::Validation("Passwords do not match".to_string()));
    }

    sqlx::query("UPDATE users SET password = $1 WHERE email = $2")
        .bind(hash_password(&new_password))
        .bind(&user.email)
        .execute(&state.pool)
        .await?;

    tracing::info!(email = %user.email, "password changed");

    Ok(Envelope::success("Password updated successfully"))
}

/// List the courses the caller is registered for.
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Envelope<Vec<Course>>> {
    let courses: Vec<Course> = sqlx::query_as(&format!(
        "SELECT {COURSE_COLUMNS} \
         FROM students s \
         INNER JOIN courses c ON s.course_id = c.course_id \
         WHERE s.email = $1"
    ))
    .bind(&user.email)
    .fetch_all(&state.pool)
    .await?;

    Ok(Envelope::success(courses))
}

/// Joined course+video row. Video columns are nullable: a course with no
/// videos yet still appears.
#[derive(Debug, Serialize, FromRow)]
pub struct CourseWithVideo {
    pub course_id: i32,
    pub course_name: String,
    pub description: Option<String>,
    pub fees: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub video_expire_days: i32,
    pub video_id: Option<i32>,
    pub video_title: Option<String>,
    pub video_description: Option<String>,
    pub youtube_url: Option<String>,
    pub added_at: Option<Date>,
}

/// List the caller's courses with their videos.
pub async fn my_courses_with_videos(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Envelope<Vec<CourseWithVideo>>> {
    let rows: Vec<CourseWithVideo> = sqlx::query_as(&format!(
        "SELECT {COURSE_COLUMNS}, \
                v.video_id, v.title AS video_title, v.description AS video_description, \
                v.youtube_url, v.added_at \
         FROM students s \
         INNER JOIN courses c ON s.course_id = c.course_id \
         LEFT JOIN videos v ON c.course_id = v.course_id \
         WHERE s.email = $1"
    ))
    .bind(&user.email)
    .fetch_all(&state.pool)
    .await?;

    Ok(Envelope::success(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case_wire_names() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"courseId": 7, "email": "a@x.com", "name": "Asha", "mobileNo": "9876543210"}"#,
        )
        .unwrap();

        assert_eq!(req.course_id, Some(7));
        assert_eq!(req.email.as_deref(), Some("a@x.com"));
        assert_eq!(req.name.as_deref(), Some("Asha"));
        assert_eq!(req.mobile_no.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert!(req.course_id.is_none());
        assert!(req.name.is_none());
    }

    #[test]
    fn test_change_password_request_wire_names() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"newPassword": "a", "confirmPassword": "b"}"#).unwrap();
        assert_eq!(req.new_password.as_deref(), Some("a"));
        assert_eq!(req.confirm_password.as_deref(), Some("b"));
    }
}
