use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use portfolio_api::app::{build_router, AppState};
use portfolio_api::config::AppConfig;
use portfolio_api::db::archive_repository::{ArchiveRepository, MongoArchiveRepository};
use portfolio_api::db::connection;
use portfolio_api::db::tag_repository::{MongoTagRepository, TagRepository};
use portfolio_api::db::work_repository::{MongoWorkRepository, WorkRepository};

/// Holds a running MongoDB container and the router wired to it.
///
/// The container is kept alive for as long as this struct lives.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub db: mongodb::Database,
    pub router: Router,
    pub works: Arc<dyn WorkRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub archive: Arc<dyn ArchiveRepository>,
}

impl TestEnv {
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let config = AppConfig {
            mongodb_uri: format!("mongodb://127.0.0.1:{}", mongo_port),
            database: "portfolio_test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: "does-not-exist".to_string(),
        };
        let db = connection::connect(&config)
            .await
            .expect("Failed to connect to MongoDB");

        let works: Arc<dyn WorkRepository> = Arc::new(MongoWorkRepository::new(&db));
        let tags: Arc<dyn TagRepository> = Arc::new(MongoTagRepository::new(&db));
        let archive: Arc<dyn ArchiveRepository> = Arc::new(MongoArchiveRepository::new(&db));

        let state = AppState {
            works: works.clone(),
            tags: tags.clone(),
            archive: archive.clone(),
        };
        let router = build_router(state, &config.static_dir);

        Self {
            _mongo: mongo_container,
            db,
            router,
            works,
            tags,
            archive,
        }
    }

    /// Build a `TestServer` that does NOT expect success by default, so error
    /// statuses can be asserted.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Number of documents currently in a collection.
    pub async fn count(&self, collection: &str) -> u64 {
        self.db
            .collection::<mongodb::bson::Document>(collection)
            .count_documents(mongodb::bson::doc! {})
            .await
            .expect("Failed to count documents")
    }

    /// Helper: create a tag via the API and return its hex id.
    pub async fn create_tag(&self, server: &axum_test::TestServer, name: &str) -> String {
        let response = server
            .post("/tag")
            .json(&serde_json::json!({ "name": name }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        created_id(&response.text())
    }

    /// Helper: post a work referencing the given tag ids.
    pub async fn post_work(
        &self,
        server: &axum_test::TestServer,
        name: &str,
        tags: &[String],
    ) -> axum_test::TestResponse {
        server
            .post("/work")
            .json(&serde_json::json!({
                "name": name,
                "description": "A project",
                "year": 2022,
                "tags": tags,
                "link": "https://example.com/project",
            }))
            .await
    }
}

/// Extract the id from a `... created with ID: <hex>` body.
pub fn created_id(body: &str) -> String {
    body.rsplit(' ')
        .next()
        .expect("Response body should end with an id")
        .to_string()
}
