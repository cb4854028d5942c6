use axum::extract::State;

use crate::api::client_json::to_client_json;
use crate::api::errors::{log_server_error, ListError};
use crate::app::AppState;
use crate::db::archive_repository::ArchiveRepository;
use crate::db::models::{ArchiveEntry, ListResponse};
use crate::error::AppError;

/// Core logic for `GET /archive`.
pub async fn process_list_archive(
    repo: &dyn ArchiveRepository,
) -> Result<ListResponse<ArchiveEntry>, AppError> {
    let entries = repo.list_all().await?;
    Ok(ListResponse::ok("got archive", entries))
}

/// Axum handler for `GET /archive`.
pub async fn list_archive_handler(
    State(state): State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ListError> {
    let body = process_list_archive(state.archive.as_ref())
        .await
        .and_then(|response| to_client_json(&response))
        .inspect_err(log_server_error)?;
    Ok(axum::Json(body))
}
