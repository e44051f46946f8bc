//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use grouper_core::model::Entity;
use grouper_core::storage::{EntityStore, Result, StoreError};

/// In-memory store for one entity kind.
///
/// Clones share the same records.
#[derive(Debug, Clone)]
pub struct InMemoryStore<E: Entity> {
    records: Arc<RwLock<HashMap<String, E>>>,
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryStore<E> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    async fn fetch(&self, id: &str) -> Result<Option<E>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn insert(&self, entity: &E) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.id()) {
            return Err(StoreError::AlreadyExists {
                kind: E::KIND,
                id: entity.id().to_string(),
            });
        }
        records.insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    async fn overwrite(&self, entity: &E) -> Result<()> {
        let mut records = self.records.write().await;
        if !records.contains_key(entity.id()) {
            return Err(StoreError::NotFound {
                kind: E::KIND,
                id: entity.id().to_string(),
            });
        }
        records.insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if records.remove(id).is_none() {
            return Err(StoreError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
