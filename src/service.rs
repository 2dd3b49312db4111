//! Item service: existence checks, transactional writes and the lookup cache.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheKey, TodoCache};
use crate::error::{ServiceError, ServiceResult};
use crate::model::TodoItem;
use crate::storage::TodoRepository;

/// Key evicted by [`TodoService::delete`]. Nothing else reads or writes it.
const DELETE_EVICTION_KEY: &str = "users";

/// CRUD over [`TodoRepository`] with an optional [`TodoCache`].
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    cache: Option<TodoCache>,
}

impl TodoService {
    /// A service that consults `cache` on lookups.
    pub fn new(repository: Arc<dyn TodoRepository>, cache: TodoCache) -> Self {
        Self {
            repository,
            cache: Some(cache),
        }
    }

    /// A service whose lookups always go to storage.
    pub fn without_cache(repository: Arc<dyn TodoRepository>) -> Self {
        Self {
            repository,
            cache: None,
        }
    }

    /// Every item in storage order.
    pub async fn get_all(&self) -> ServiceResult<Vec<TodoItem>> {
        Ok(self.repository.list_all().await?)
    }

    /// Served from the cache on a hit. A miss reads storage and leaves the
    /// cache untouched.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<TodoItem>> {
        if let Some(cache) = &self.cache {
            if let Some(item) = cache.get(&CacheKey::Id(id)).await {
                debug!(id, "todo cache hit");
                return Ok(Some(item));
            }
            debug!(id, "todo cache miss");
        }
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Insert `item` in its own transaction. Storage assigns the id.
    pub async fn add(&self, item: TodoItem) -> ServiceResult<()> {
        let mut writer = self.repository.begin().await?;
        writer.insert(&item).await?;
        writer.commit().await?;
        info!(title = ?item.title, "todo created");
        Ok(())
    }

    /// Replace every field of an existing item, then cache it under its title.
    pub async fn update(&self, item: TodoItem) -> ServiceResult<()> {
        let Some(id) = item.id else {
            return Err(ServiceError::NotFound);
        };
        if self.repository.find_by_id(id).await?.is_none() {
            debug!(id, "update target not found");
            return Err(ServiceError::NotFound);
        }

        let mut writer = self.repository.begin().await?;
        writer.replace(&item).await?;
        writer.commit().await?;
        info!(id, "todo updated");

        if let Some(cache) = &self.cache {
            cache.put(CacheKey::Title(item.title.clone()), item).await;
        }
        Ok(())
    }

    /// Remove an existing item, then evict the `"users"` cache key.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            debug!(id, "delete target not found");
            return Err(ServiceError::NotFound);
        }

        let mut writer = self.repository.begin().await?;
        writer.remove(id).await?;
        writer.commit().await?;
        info!(id, "todo deleted");

        if let Some(cache) = &self.cache {
            cache.evict(&CacheKey::Literal(DELETE_EVICTION_KEY)).await;
        }
        Ok(())
    }
}
