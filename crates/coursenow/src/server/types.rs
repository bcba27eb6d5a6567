use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// An error returned to API clients.
///
/// Only `message` is sent back; `details` stays in the server log.
#[derive(Debug)]
pub struct ApiErrorType {
    pub status_code: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl<S, T> From<(StatusCode, S, Option<T>)> for ApiErrorType
where
    S: Into<String>,
    T: Into<String>,
{
    fn from((status_code, message, details): (StatusCode, S, Option<T>)) -> Self {
        Self {
            status_code,
            message: message.into(),
            details: details.map(Into::into),
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        match &self.details {
            Some(details) => error!("{} ({}): {}", self.message, self.status_code, details),
            None => error!("{} ({})", self.message, self.status_code),
        }

        (self.status_code, self.message).into_response()
    }
}
