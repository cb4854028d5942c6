use thiserror::Error;

/// Application-wide error types.
///
/// `BadRequest` and `NotFound` are client-facing outcomes; every other variant
/// surfaces as a 500 carrying the raw detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// A path identifier that is not a valid ObjectId.
    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error maps to a 5xx response.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidId(_) | AppError::Database(_) | AppError::Internal(_)
        )
    }

    /// Prefix the detail of a server error with the endpoint's context
    /// (e.g. `Error fetching work: ...`). Client errors are left untouched.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            AppError::InvalidId(msg) => AppError::InvalidId(format!("{context}: {msg}")),
            AppError::Database(msg) => AppError::Database(format!("{context}: {msg}")),
            AppError::Internal(msg) => AppError::Internal(format!("{context}: {msg}")),
            other => other,
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<bson::oid::Error> for AppError {
    fn from(err: bson::oid::Error) -> Self {
        AppError::InvalidId(err.to_string())
    }
}
