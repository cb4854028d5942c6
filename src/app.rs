use std::path::Path;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{archive, tags, works};
use crate::db::archive_repository::{ArchiveRepository, MongoArchiveRepository};
use crate::db::tag_repository::{MongoTagRepository, TagRepository};
use crate::db::work_repository::{MongoWorkRepository, WorkRepository};

/// Shared state handed to every handler.
///
/// Built once at startup from a connected database and never replaced.
#[derive(Clone)]
pub struct AppState {
    pub works: Arc<dyn WorkRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub archive: Arc<dyn ArchiveRepository>,
}

impl AppState {
    pub fn from_database(db: &mongodb::Database) -> Self {
        Self {
            works: Arc::new(MongoWorkRepository::new(db)),
            tags: Arc::new(MongoTagRepository::new(db)),
            archive: Arc::new(MongoArchiveRepository::new(db)),
        }
    }
}

/// Axum handler for `GET /`.
pub async fn root_handler() -> &'static str {
    "got it"
}

/// Build the application router. Paths no route matches are served from
/// `static_dir`.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/works", get(works::list_works_handler))
        .route("/works/{id}", get(works::get_work_handler))
        .route("/work", post(works::create_work_handler))
        .route("/work/{id}", delete(works::delete_work_handler))
        .route("/tag", post(tags::create_tag_handler))
        .route("/tag/{id}", get(tags::get_tag_handler))
        .route("/archive", get(archive::list_archive_handler))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
