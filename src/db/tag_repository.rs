use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::db::models::{Tag, TAGS_COLLECTION};
use crate::error::AppError;

/// Repository trait for tag operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a new tag and return its generated id.
    async fn insert(&self, tag: Tag) -> Result<ObjectId, AppError>;

    /// Find a tag by its id.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Tag>, AppError>;

    /// Count how many of the given ids belong to existing tags.
    ///
    /// Uses a single `$in` query, so duplicate ids are only counted once.
    async fn count_existing(&self, ids: Vec<ObjectId>) -> Result<u64, AppError>;
}

/// MongoDB implementation of the TagRepository.
pub struct MongoTagRepository {
    collection: mongodb::Collection<Tag>,
}

impl MongoTagRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(TAGS_COLLECTION),
        }
    }
}

#[async_trait]
impl TagRepository for MongoTagRepository {
    async fn insert(&self, tag: Tag) -> Result<ObjectId, AppError> {
        let result = self.collection.insert_one(&tag).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(format!(
                "Inserted tag has a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Tag>, AppError> {
        use mongodb::bson::doc;

        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn count_existing(&self, ids: Vec<ObjectId>) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        if ids.is_empty() {
            return Ok(0);
        }

        Ok(self
            .collection
            .count_documents(doc! { "_id": { "$in": ids } })
            .await?)
    }
}
