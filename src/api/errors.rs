use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Log a failure that is about to become a 5xx response. Client errors are
/// not logged here.
pub fn log_server_error(err: &AppError) {
    if err.is_server_error() {
        tracing::error!("{err}");
    }
}

/// Single-resource endpoints answer errors in plain text.
///
/// Server errors leak the raw driver detail to the caller; this is the
/// existing contract of the API.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Error wrapper for the collection listing endpoints, which answer with a
/// JSON envelope instead of plain text.
#[derive(Debug)]
pub struct ListError(pub AppError);

impl From<AppError> for ListError {
    fn from(err: AppError) -> Self {
        ListError(err)
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": "something went wrong",
            "value": self.0.to_string(),
        });

        (self.0.status_code(), axum::Json(body)).into_response()
    }
}
