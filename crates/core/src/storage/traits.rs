use async_trait::async_trait;

use crate::model::Entity;

use super::Result;

/// Key-value store adapter for one entity kind.
///
/// The backing store is authoritative; implementations hold no cache of
/// their own. A record written then fetched must compare equal on every
/// modeled field.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Fetches a record by id. `Ok(None)` means the store has no such record.
    async fn fetch(&self, id: &str) -> Result<Option<E>>;

    /// Writes a new record.
    async fn insert(&self, entity: &E) -> Result<()>;

    /// Replaces an existing record in full.
    async fn overwrite(&self, entity: &E) -> Result<()>;

    /// Removes a record by id.
    async fn remove(&self, id: &str) -> Result<()>;
}
