use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde::Deserialize;

use crate::api::client_json::to_client_json;
use crate::api::errors::{log_server_error, ListError};
use crate::api::payload::{Payload, PayloadRejection};
use crate::app::AppState;
use crate::db::models::{ListResponse, Work, WorkDetail, Year};
use crate::db::tag_repository::TagRepository;
use crate::db::work_repository::WorkRepository;
use crate::error::AppError;

pub const MISSING_FIELDS: &str = "All fields are required.";
pub const INVALID_TAGS: &str = "One or more tags are invalid.";

/// Request payload for `POST /work`, as JSON or form fields.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation failure rather than a body rejection. An absent
/// `tags` reads as empty, which is rejected the same way.
#[derive(Debug, Deserialize)]
pub struct CreateWorkRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<Year>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub link: Option<String>,
}

fn required(field: Option<String>) -> Result<String, AppError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.into()))
}

/// Parse the requested tag ids. Any malformed id makes the whole set invalid.
fn parse_tag_ids(tags: &[String]) -> Result<Vec<ObjectId>, AppError> {
    tags.iter()
        .map(|tag| ObjectId::parse_str(tag))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::debug!("Rejecting malformed tag id: {e}");
            AppError::BadRequest(INVALID_TAGS.into())
        })
}

/// Core logic for `GET /works`.
pub async fn process_list_works(repo: &dyn WorkRepository) -> Result<ListResponse<Work>, AppError> {
    let works = repo.list_all().await?;
    Ok(ListResponse::ok("got all works", works))
}

/// Core logic for `GET /works/:id`.
///
/// A malformed id is not treated as "not found": it surfaces as a server error.
pub async fn process_get_work(repo: &dyn WorkRepository, id: &str) -> Result<WorkDetail, AppError> {
    let id = ObjectId::parse_str(id)?;

    repo.find_with_tags(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Work not found".into()))
}

/// Core logic for `POST /work`.
///
/// Validates that every field is present, then that every referenced tag
/// exists, before inserting. Returns the new work's id.
pub async fn process_create_work(
    works: &dyn WorkRepository,
    tags: &dyn TagRepository,
    request: CreateWorkRequest,
) -> Result<ObjectId, AppError> {
    // 1. Required fields
    let name = required(request.name)?;
    let description = required(request.description)?;
    let link = required(request.link)?;
    let year = request
        .year
        .filter(|year| !year.is_blank())
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.into()))?;
    if request.tags.is_empty() {
        return Err(AppError::BadRequest(MISSING_FIELDS.into()));
    }

    // 2. Tag ids must parse
    let tag_ids = parse_tag_ids(&request.tags)?;

    // 3. Tag ids must reference existing tags. Duplicates are compared as a set
    //    since the `$in` lookup collapses them.
    let distinct: Vec<ObjectId> = tag_ids
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let expected = distinct.len() as u64;
    let found = tags.count_existing(distinct).await?;
    if found != expected {
        tracing::warn!(expected, found, "Rejecting work referencing unknown tags");
        return Err(AppError::BadRequest(INVALID_TAGS.into()));
    }

    // 4. Insert
    let work = Work {
        id: None,
        name,
        description,
        year,
        tags: tag_ids,
        link,
    };

    works.insert(work).await
}

/// Core logic for `DELETE /work/:id`.
pub async fn process_delete_work(repo: &dyn WorkRepository, id: &str) -> Result<ObjectId, AppError> {
    let id = ObjectId::parse_str(id)?;

    if repo.delete(id).await? {
        Ok(id)
    } else {
        Err(AppError::NotFound("Work not found.".into()))
    }
}

/// Axum handler for `GET /works`.
pub async fn list_works_handler(
    State(state): State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ListError> {
    let body = process_list_works(state.works.as_ref())
        .await
        .and_then(|response| to_client_json(&response))
        .inspect_err(log_server_error)?;
    Ok(axum::Json(body))
}

/// Axum handler for `GET /works/{id}`.
pub async fn get_work_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    let body = process_get_work(state.works.as_ref(), &id)
        .await
        .and_then(|work| to_client_json(&work))
        .map_err(|e| e.with_context("Error fetching work"))
        .inspect_err(log_server_error)?;
    Ok(axum::Json(body))
}

/// Axum handler for `POST /work`.
pub async fn create_work_handler(
    State(state): State<AppState>,
    body: Result<Payload<CreateWorkRequest>, PayloadRejection>,
) -> Result<(StatusCode, String), AppError> {
    let Payload(request) = body.map_err(|e| {
        tracing::debug!("Rejected work body: {e}");
        AppError::BadRequest(MISSING_FIELDS.into())
    })?;

    let id = process_create_work(state.works.as_ref(), state.tags.as_ref(), request)
        .await
        .map_err(|e| e.with_context("Error creating work"))
        .inspect_err(log_server_error)?;

    tracing::info!(%id, "Work created");
    Ok((StatusCode::CREATED, format!("Work created with ID: {id}")))
}

/// Axum handler for `DELETE /work/{id}`.
pub async fn delete_work_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    let id = process_delete_work(state.works.as_ref(), &id)
        .await
        .map_err(|e| e.with_context("Error deleting work"))
        .inspect_err(log_server_error)?;

    tracing::info!(%id, "Work deleted");
    Ok(format!("Work with ID {id} deleted successfully."))
}
