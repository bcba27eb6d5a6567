use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::schedule::{collect_current_courses, ScheduleError};
use crate::server::types::ApiErrorType;
use crate::types::ServerState;

/// GET /api/courses/
/// Returns every course that is in session right now
pub async fn get_current_courses(State(s): State<Arc<ServerState>>) -> Response {
    let now = s.clock.now();
    info!(
        "GET /api/courses/ (now={} {})",
        now.day_month(),
        now.at().format("%H:%M")
    );

    match collect_current_courses(&s.config.courses_dir, &now, s.config.file_timeout()).await {
        Ok(courses) => (StatusCode::OK, Json(courses)).into_response(),
        Err(e) => schedule_error_to_response(e),
    }
}

/// Converts ScheduleError to API response.
fn schedule_error_to_response(error: ScheduleError) -> Response {
    let message = if error.is_request_fatal() {
        "Error reading course directory"
    } else {
        "Error collecting current courses"
    };

    ApiErrorType::from((
        StatusCode::INTERNAL_SERVER_ERROR,
        message,
        Some(error.to_string()),
    ))
    .into_response()
}
