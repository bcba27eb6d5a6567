use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::types::ServerState;

/// GET /
pub async fn get_welcome() -> impl IntoResponse {
    (StatusCode::OK, "Welcome to the course schedule API!")
}

/// GET /health
/// Liveness check. Reports whether the course directory is reachable without
/// revealing where it is.
pub async fn get_health(State(s): State<Arc<ServerState>>) -> impl IntoResponse {
    let courses_dir_readable = tokio::fs::read_dir(&s.config.courses_dir).await.is_ok();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "courses_dir_readable": courses_dir_readable,
        })),
    )
}
