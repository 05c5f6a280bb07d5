// ABOUTME: Generic entity store trait and its in-memory implementation
// ABOUTME: Insertion-ordered collection with merge-by-id updates behind an async interface

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use agentdash_core::ValidationError;

use crate::{StorageError, StorageResult};

/// A record the store can hold: it has a stable id and accepts partial updates
pub trait Entity: Clone + Send + Sync + 'static {
    /// Partial update with merge semantics
    type Patch: Send + 'static;

    /// Human-readable kind used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Merge `patch` into `self`. Must leave `self` untouched on error.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ValidationError>;
}

/// Storage contract shared by every entity collection.
///
/// Calls are async so a persistent backend can replace the in-memory one
/// without touching callers.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// All records in insertion order
    async fn get_all(&self) -> StorageResult<Vec<T>>;

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<T>>;

    /// Append a record; fails with `DuplicateId` when the id is taken
    async fn add(&self, item: T) -> StorageResult<T>;

    /// Merge `patch` into the record with `id`; fails with `NotFound` when absent
    async fn update(&self, id: &str, patch: T::Patch) -> StorageResult<T>;

    /// Remove the record with `id`; returns whether anything was removed
    async fn delete(&self, id: &str) -> StorageResult<bool>;

    async fn count(&self) -> StorageResult<usize>;
}

/// Vec-backed store. Lookups are linear scans, which is fine for the few
/// dozen records a dashboard holds.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    pub(crate) items: RwLock<Vec<T>>,
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Fetch a record or fail with `NotFound`
    pub async fn require(&self, id: &str) -> StorageResult<T> {
        self.get_by_id(id).await?.ok_or_else(|| not_found::<T>(id))
    }

    /// Return copies of all records matching `predicate`, in insertion order
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let items = self.items.read().await;
        items.iter().filter(|item| predicate(item)).cloned().collect()
    }

    /// Run `mutate` against the record with `id` under the write lock
    pub(crate) async fn modify<F>(&self, id: &str, mutate: F) -> StorageResult<T>
    where
        F: FnOnce(&mut T) -> StorageResult<()> + Send,
    {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        mutate(item)?;
        Ok(item.clone())
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn not_found<T: Entity>(id: &str) -> StorageError {
    StorageError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn get_all(&self) -> StorageResult<Vec<T>> {
        let items = self.items.read().await;
        debug!("Listing {} {} records", items.len(), T::KIND);
        Ok(items.clone())
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<T>> {
        debug!("Fetching {}: {}", T::KIND, id);
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn add(&self, item: T) -> StorageResult<T> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(StorageError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }

        debug!("Adding {}: {}", T::KIND, item.id());
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, patch: T::Patch) -> StorageResult<T> {
        debug!("Updating {}: {}", T::KIND, id);
        self.modify(id, |item| item.apply(patch).map_err(StorageError::from))
            .await
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id() != id);
        let removed = items.len() != before;

        if removed {
            debug!("Deleted {}: {}", T::KIND, id);
        } else {
            debug!("Delete of missing {} ignored: {}", T::KIND, id);
        }
        Ok(removed)
    }

    async fn count(&self) -> StorageResult<usize> {
        Ok(self.items.read().await.len())
    }
}
