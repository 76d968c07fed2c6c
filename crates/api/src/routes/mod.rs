//! HTTP routes
//!
//! Three subtrees, mirroring who may call them:
//! - `/public` — no gate (login, active-course browsing)
//! - `/students` — access gate, with the registration endpoint allow-listed
//!   through it
//! - `/admin` — access gate plus admin role gate

pub mod admin;
pub mod public;
pub mod students;

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;

/// Course row as stored in `courses`. Shared by the public, student, and
/// admin listings, which all return whole rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub course_id: i32,
    pub course_name: String,
    pub description: Option<String>,
    pub fees: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub video_expire_days: i32,
}

/// Column list matching [`Course`], for handlers selecting through joins.
pub(crate) const COURSE_COLUMNS: &str =
    "c.course_id, c.course_name, c.description, c.fees, c.start_date, c.end_date, c.video_expire_days";

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth_state();

    let public_routes = Router::new()
        .route("/auth/login", post(public::login))
        .route(
            "/courses/all-active-courses",
            get(public::all_active_courses),
        );

    let student_routes = Router::new()
        .route(
            "/student/register-to-course",
            post(students::register_to_course),
        )
        .route("/student/change-password", put(students::change_password))
        .route("/student/my-courses", get(students::my_courses))
        .route(
            "/student/my-courses-with-videos",
            get(students::my_courses_with_videos),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Layer order matters: the access gate is outermost so the role gate
    // always sees an attached identity.
    let admin_routes = Router::new()
        .route("/course/all-courses", get(admin::all_courses))
        .route("/course/add", post(admin::add_course))
        .route("/course/update/{course_id}", put(admin::update_course))
        .route("/course/delete/{course_id}", delete(admin::delete_course))
        .route("/video/all-videos", get(admin::all_videos))
        .route("/video/add", post(admin::add_video))
        .route("/video/update/{video_id}", put(admin::update_video))
        .route("/video/delete/{video_id}", delete(admin::delete_video))
        .route("/enrolled-students", get(admin::enrolled_students))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(auth_state, require_auth));

    Router::new()
        .nest("/public", public_routes)
        .nest("/students", student_routes)
        .nest("/admin", admin_routes)
        .with_state(state)
}
