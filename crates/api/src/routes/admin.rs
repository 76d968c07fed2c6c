//! Admin routes: course and video management, enrollment roster
//!
//! Every handler here sits behind the access gate and the admin role gate.
//! List endpoints take optional filters and fall back to an unfiltered
//! listing when the filters are absent; several UI screens depend on the
//! unfiltered form.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

use super::{Course, COURSE_COLUMNS};

// =============================================================================
// Courses
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AllCoursesQuery {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// List courses, optionally restricted to those running across the given
/// date range.
pub async fn all_courses(
    State(state): State<AppState>,
    Query(query): Query<AllCoursesQuery>,
) -> ApiResult<Envelope<Vec<Course>>> {
    let courses: Vec<Course> = match (query.start_date, query.end_date) {
        (Some(start_date), Some(end_date)) => {
            sqlx::query_as(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses c \
                 WHERE c.start_date <= $1 AND c.end_date >= $2"
            ))
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&state.pool)
            .await?
        }
        _ => {
            sqlx::query_as(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses c ORDER BY c.course_id DESC"
            ))
            .fetch_all(&state.pool)
            .await?
        }
    };

    Ok(Envelope::success(courses))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub fees: Option<i64>,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub video_expire_days: Option<i32>,
}

struct CourseFields {
    course_name: String,
    description: Option<String>,
    fees: i64,
    start_date: Date,
    end_date: Date,
    video_expire_days: i32,
}

/// Presence check for the course mutations. The description may be empty;
/// everything else is required.
fn require_course_fields(req: CourseRequest) -> ApiResult<CourseFields> {
    match (
        req.course_name,
        req.fees,
        req.start_date,
        req.end_date,
        req.video_expire_days,
    ) {
        (Some(course_name), Some(fees), Some(start_date), Some(end_date), Some(video_expire_days))
            if !course_name.is_empty() =>
        {
            Ok(CourseFields {
                course_name,
                description: req.description,
                fees,
                start_date,
                end_date,
                video_expire_days,
            })
        }
        _ => Err(ApiError::Validation("All fields are required".to_string())),
    }
}

pub async fn add_course(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let fields = require_course_fields(req)?;

    sqlx::query(
        "INSERT INTO courses (course_name, description, fees, start_date, end_date, video_expire_days) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&fields.course_name)
    .bind(&fields.description)
    .bind(fields.fees)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.video_expire_days)
    .execute(&state.pool)
    .await?;

    tracing::info!(course_name = %fields.course_name, "course added");

    Ok(Envelope::success("Course added successfully"))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    Json(req): Json<CourseRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let fields = require_course_fields(req)?;

    sqlx::query(
        "UPDATE courses SET course_name = $1, description = $2, fees = $3, \
         start_date = $4, end_date = $5, video_expire_days = $6 \
         WHERE course_id = $7",
    )
    .bind(&fields.course_name)
    .bind(&fields.description)
    .bind(fields.fees)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.video_expire_days)
    .bind(course_id)
    .execute(&state.pool)
    .await?;

    Ok(Envelope::success("Course updated successfully"))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> ApiResult<Envelope<&'static str>> {
    sqlx::query("DELETE FROM courses WHERE course_id = $1")
        .bind(course_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(course_id = course_id, "course deleted");

    Ok(Envelope::success("Course deleted successfully"))
}

// =============================================================================
// Videos
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AllVideosQuery {
    #[serde(rename = "courseId")]
    pub course_id: Option<i32>,
}

/// Video row joined with its course name for the admin listing.
#[derive(Debug, Serialize, FromRow)]
pub struct VideoWithCourse {
    pub video_id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: Option<String>,
    pub added_at: Date,
    pub course_name: String,
}

const VIDEO_COLUMNS: &str =
    "v.video_id, v.course_id, v.title, v.description, v.youtube_url, v.added_at, c.course_name";

/// List videos with their course names, optionally for one course.
pub async fn all_videos(
    State(state): State<AppState>,
    Query(query): Query<AllVideosQuery>,
) -> ApiResult<Envelope<Vec<VideoWithCourse>>> {
    let videos: Vec<VideoWithCourse> = match query.course_id {
        Some(course_id) => {
            sqlx::query_as(&format!(
                "SELECT {VIDEO_COLUMNS} FROM videos v \
                 INNER JOIN courses c ON v.course_id = c.course_id \
                 WHERE v.course_id = $1 \
                 ORDER BY v.video_id DESC"
            ))
            .bind(course_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!(
                "SELECT {VIDEO_COLUMNS} FROM videos v \
                 INNER JOIN courses c ON v.course_id = c.course_id \
                 ORDER BY v.video_id DESC"
            ))
            .fetch_all(&state.pool)
            .await?
        }
    };

    Ok(Envelope::success(videos))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default)]
    pub course_id: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default, rename = "youtubeURL")]
    pub youtube_url: Option<String>,
}

struct VideoFields {
    course_id: i32,
    title: String,
    description: Option<String>,
    youtube_url: Option<String>,
}

/// Presence check for the video mutations. The URL may be absent: videos
/// are sometimes registered before upload.
fn require_video_fields(req: VideoRequest) -> ApiResult<VideoFields> {
    match (req.course_id, req.title) {
        (Some(course_id), Some(title)) if !title.is_empty() => Ok(VideoFields {
            course_id,
            title,
            description: req.description,
            youtube_url: req.youtube_url,
        }),
        _ => Err(ApiError::Validation("All fields are required".to_string())),
    }
}

/// Add a video; `added_at` stamps the current date.
pub async fn add_video(
    State(state): State<AppState>,
    Json(req): Json<VideoRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let fields = require_video_fields(req)?;

    sqlx::query(
        "INSERT INTO videos (course_id, title, description, youtube_url, added_at) \
         VALUES ($1, $2, $3, $4, CURRENT_DATE)",
    )
    .bind(fields.course_id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.youtube_url)
    .execute(&state.pool)
    .await?;

    tracing::info!(course_id = fields.course_id, title = %fields.title, "video added");

    Ok(Envelope::success("Video added successfully"))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path(video_id): Path<i32>,
    Json(req): Json<VideoRequest>,
) -> ApiResult<Envelope<&'static str>> {
    let fields = require_video_fields(req)?;

    sqlx::query(
        "UPDATE videos SET course_id = $1, title = $2, description = $3, youtube_url = $4 \
         WHERE video_id = $5",
    )
    .bind(fields.course_id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.youtube_url)
    .bind(video_id)
    .execute(&state.pool)
    .await?;

    Ok(Envelope::success("Video updated successfully"))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<i32>,
) -> ApiResult<Envelope<&'static str>> {
    sqlx::query("DELETE FROM videos WHERE video_id = $1")
        .bind(video_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(video_id = video_id, "video deleted");

    Ok(Envelope::success("Video deleted successfully"))
}

// =============================================================================
// Enrollment roster
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct EnrolledStudentsQuery {
    #[serde(rename = "courseId")]
    pub course_id: Option<i32>,
}

/// Enrollment row joined with its course name. The join is LEFT: a student
/// row pointing at a deleted course still shows up, with a null name.
#[derive(Debug, Serialize, FromRow)]
pub struct EnrolledStudent {
    pub name: String,
    pub email: String,
    pub course_id: i32,
    pub mobile_no: String,
    pub course_name: Option<String>,
}

const STUDENT_COLUMNS: &str = "s.name, s.email, s.course_id, s.mobile_no, c.course_name";

/// List enrolled students, optionally for one course.
pub async fn enrolled_students(
    State(state): State<AppState>,
    Query(query): Query<EnrolledStudentsQuery>,
) -> ApiResult<Envelope<Vec<EnrolledStudent>>> {
    let students: Vec<EnrolledStudent> = match query.course_id {
        Some(course_id) => {
            sqlx::query_as(&format!(
                "SELECT {STUDENT_COLUMNS} FROM students s \
                 LEFT JOIN courses c ON s.course_id = c.course_id \
                 WHERE s.course_id = $1 \
                 ORDER BY s.email ASC"
            ))
            .bind(course_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!(
                "SELECT {STUDENT_COLUMNS} FROM students s \
                 LEFT JOIN courses c ON s.course_id = c.course_id \
                 ORDER BY s.email ASC"
            ))
            .fetch_all(&state.pool)
            .await?
        }
    };

    Ok(Envelope::success(students))
}
