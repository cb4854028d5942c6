//! In-memory repositories backing the unit tests of the API layer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::db::archive_repository::ArchiveRepository;
use crate::db::models::{ArchiveEntry, Tag, Work, WorkDetail};
use crate::db::tag_repository::TagRepository;
use crate::db::work_repository::WorkRepository;
use crate::error::AppError;

#[derive(Clone, Default)]
pub struct InMemoryTags {
    tags: Arc<Mutex<Vec<Tag>>>,
}

impl InMemoryTags {
    pub fn with_names(names: &[&str]) -> Self {
        let tags = names
            .iter()
            .map(|name| Tag {
                id: Some(ObjectId::new()),
                name: name.to_string(),
            })
            .collect();
        Self {
            tags: Arc::new(Mutex::new(tags)),
        }
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.tags.lock().unwrap().iter().filter_map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.lock().unwrap().len()
    }
}

#[async_trait]
impl TagRepository for InMemoryTags {
    async fn insert(&self, mut tag: Tag) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        tag.id = Some(id);
        self.tags.lock().unwrap().push(tag);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Tag>, AppError> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == Some(id))
            .cloned())
    }

    async fn count_existing(&self, ids: Vec<ObjectId>) -> Result<u64, AppError> {
        let tags = self.tags.lock().unwrap();
        Ok(tags
            .iter()
            .filter(|t| t.id.is_some_and(|id| ids.contains(&id)))
            .count() as u64)
    }
}

/// Works store. The join in `find_with_tags` resolves against `tags`, which
/// is empty unless attached with [`InMemoryWorks::joined_with`].
#[derive(Clone, Default)]
pub struct InMemoryWorks {
    works: Arc<Mutex<Vec<Work>>>,
    tags: InMemoryTags,
}

impl InMemoryWorks {
    pub fn joined_with(self, tags: &InMemoryTags) -> Self {
        Self {
            works: self.works,
            tags: tags.clone(),
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<Work> {
        self.works
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == Some(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.works.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkRepository for InMemoryWorks {
    async fn list_all(&self) -> Result<Vec<Work>, AppError> {
        Ok(self.works.lock().unwrap().clone())
    }

    async fn find_with_tags(&self, id: ObjectId) -> Result<Option<WorkDetail>, AppError> {
        let Some(work) = self.get(id) else {
            return Ok(None);
        };

        let tag_details = self
            .tags
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.id.is_some_and(|tag_id| work.tags.contains(&tag_id)))
            .cloned()
            .collect();

        Ok(Some(WorkDetail { work, tag_details }))
    }

    async fn insert(&self, mut work: Work) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        work.id = Some(id);
        self.works.lock().unwrap().push(work);
        Ok(id)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut works = self.works.lock().unwrap();
        let before = works.len();
        works.retain(|w| w.id != Some(id));
        Ok(works.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryArchive {
    entries: Arc<Mutex<Vec<ArchiveEntry>>>,
}

impl InMemoryArchive {
    pub fn with_entries(entries: Vec<ArchiveEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

#[async_trait]
impl ArchiveRepository for InMemoryArchive {
    async fn list_all(&self) -> Result<Vec<ArchiveEntry>, AppError> {
        Ok(self.entries.lock().unwrap().clone())
    }
}
