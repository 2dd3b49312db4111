//! Lookup cache owned by the item service.
//!
//! Non-authoritative: entries may go stale and storage always wins. Keys are
//! deliberately heterogeneous. Lookups read [`CacheKey::Id`], updates write
//! [`CacheKey::Title`] and deletes evict [`CacheKey::Literal`]`("users")`, so
//! the three paths never touch the same entry.

use std::time::Duration;

use moka::future::Cache;

use crate::config::CacheConfig;
use crate::model::TodoItem;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Read by lookups.
    Id(i64),
    /// Written by updates. A missing title is a key of its own.
    Title(Option<String>),
    /// A fixed name, evicted by deletes.
    Literal(&'static str),
}

/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct TodoCache {
    inner: Cache<CacheKey, TodoItem>,
}

impl TodoCache {
    /// Bounded by `max_capacity`, with entries expiring after `ttl_secs` when set.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        Self {
            inner: builder.build(),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<TodoItem> {
        self.inner.get(key).await
    }

    pub async fn put(&self, key: CacheKey, item: TodoItem) {
        self.inner.insert(key, item).await;
    }

    pub async fn evict(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &CacheKey) -> bool {
        self.inner.contains_key(key)
    }
}

impl Default for TodoCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
