// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! CourseHub API Library
//!
//! This crate contains the HTTP server for the CourseHub course-management
//! platform: authentication, the uniform response envelope, and the course,
//! video, and enrollment endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
