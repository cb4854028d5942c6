use axum::extract::{Path, State};
use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde::Deserialize;

use crate::api::client_json::to_client_json;
use crate::api::errors::log_server_error;
use crate::api::payload::{Payload, PayloadRejection};
use crate::app::AppState;
use crate::db::models::Tag;
use crate::db::tag_repository::TagRepository;
use crate::error::AppError;

pub const MISSING_NAME: &str = "Name field is required.";

/// Request payload for `POST /tag`, as JSON or form fields.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: Option<String>,
}

/// Core logic for `POST /tag`. Returns the new tag's id.
pub async fn process_create_tag(
    repo: &dyn TagRepository,
    request: CreateTagRequest,
) -> Result<ObjectId, AppError> {
    let name = request
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_NAME.into()))?;

    repo.insert(Tag { id: None, name }).await
}

/// Core logic for `GET /tag/:id`.
pub async fn process_get_tag(repo: &dyn TagRepository, id: &str) -> Result<Tag, AppError> {
    let id = ObjectId::parse_str(id)?;

    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found.".into()))
}

/// Axum handler for `POST /tag`.
pub async fn create_tag_handler(
    State(state): State<AppState>,
    body: Result<Payload<CreateTagRequest>, PayloadRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Payload(request) = body.map_err(|e| {
        tracing::debug!("Rejected tag body: {e}");
        AppError::BadRequest(MISSING_NAME.into())
    })?;

    let id = process_create_tag(state.tags.as_ref(), request)
        .await
        .map_err(|e| e.with_context("Error creating tag"))
        .inspect_err(log_server_error)?;

    tracing::info!(%id, "Tag created");
    Ok((StatusCode::CREATED, format!("Tag created with ID: {id}")))
}

/// Axum handler for `GET /tag/{id}`.
pub async fn get_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    let body = process_get_tag(state.tags.as_ref(), &id)
        .await
        .and_then(|tag| to_client_json(&tag))
        .map_err(|e| e.with_context("Error fetching tag"))
        .inspect_err(log_server_error)?;

    Ok(axum::Json(body))
}
