use async_trait::async_trait;

use crate::db::models::{ArchiveEntry, ARCHIVE_COLLECTION};
use crate::error::AppError;

/// Read-only access to the archive collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ArchiveEntry>, AppError>;
}

pub struct MongoArchiveRepository {
    collection: mongodb::Collection<ArchiveEntry>,
}

impl MongoArchiveRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(ARCHIVE_COLLECTION),
        }
    }
}

#[async_trait]
impl ArchiveRepository for MongoArchiveRepository {
    async fn list_all(&self) -> Result<Vec<ArchiveEntry>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let cursor = self.collection.find(doc! {}).await?;

        Ok(cursor.try_collect().await?)
    }
}
