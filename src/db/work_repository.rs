use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::db::models::{Work, WorkDetail, TAGS_COLLECTION, WORKS_COLLECTION};
use crate::error::AppError;

/// Repository trait for work operations.
///
/// This trait allows mocking the database layer in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkRepository: Send + Sync {
    /// List every work, unfiltered.
    async fn list_all(&self) -> Result<Vec<Work>, AppError>;

    /// Find a work by id, joined with the tags it references.
    async fn find_with_tags(&self, id: ObjectId) -> Result<Option<WorkDetail>, AppError>;

    /// Insert a new work and return its generated id.
    async fn insert(&self, work: Work) -> Result<ObjectId, AppError>;

    /// Delete at most one work. Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

/// MongoDB implementation of the WorkRepository.
pub struct MongoWorkRepository {
    collection: mongodb::Collection<Work>,
}

impl MongoWorkRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(WORKS_COLLECTION),
        }
    }
}

#[async_trait]
impl WorkRepository for MongoWorkRepository {
    async fn list_all(&self) -> Result<Vec<Work>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let cursor = self.collection.find(doc! {}).await?;
        let works: Vec<Work> = cursor.try_collect().await?;

        Ok(works)
    }

    async fn find_with_tags(&self, id: ObjectId) -> Result<Option<WorkDetail>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let pipeline = vec![
            doc! { "$match": { "_id": id } },
            doc! {
                "$lookup": {
                    "from": TAGS_COLLECTION,
                    "localField": "tags",
                    "foreignField": "_id",
                    "as": "tagDetails",
                }
            },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .with_type::<WorkDetail>()
            .await?;

        Ok(cursor.try_next().await?)
    }

    async fn insert(&self, work: Work) -> Result<ObjectId, AppError> {
        let result = self.collection.insert_one(&work).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(format!(
                "Inserted work has a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        Ok(result.deleted_count == 1)
    }
}
