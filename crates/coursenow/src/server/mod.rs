use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::endpoints::{courses, status};
use crate::types::ServerState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let course_router = Router::new()
        .route("/api/courses/", get(courses::get_current_courses))
        .route("/api/courses", get(courses::get_current_courses));

    Router::new()
        .route("/", get(status::get_welcome))
        .route("/health", get(status::get_health))
        .merge(course_router)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
