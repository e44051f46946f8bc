//! Bounded write-through cache for one entity kind.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::{Mutex, OnceCell};

use grouper_core::model::Entity;
use grouper_core::outcome::{Category, Outcome};
use grouper_core::storage::EntityStore;

/// Cache slots and in-flight loads, guarded together so a miss can never
/// slip between a finished load and its cache insert.
struct CacheState<E> {
    entries: LruCache<String, E>,
    loading: HashMap<String, Arc<OnceCell<E>>>,
}

#[derive(Debug, Clone, Copy)]
enum Write {
    Insert,
    Overwrite,
}

impl Write {
    fn categories(self) -> (Category, Category) {
        match self {
            Write::Insert => (Category::PutSucceeded, Category::PutFailed),
            Write::Overwrite => (Category::UpdateSucceeded, Category::UpdateFailed),
        }
    }
}

/// Bounded LRU cache in front of an [`EntityStore`].
///
/// - **Reads**: served from the cache; a miss loads from the store exactly
///   once, however many callers ask for the same id concurrently. A load that
///   finds nothing (or fails) yields the sentinel "empty" entity, which is
///   cached too and stays until the id is written again.
/// - **Writes**: go to the store first; the cache entry is replaced only
///   after the store accepted the write.
/// - **Deletes**: go to the store, then tombstone the id with the sentinel
///   whatever the store answered.
///
/// The internal lock is never held across a store call.
pub struct EntityCache<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    state: Mutex<CacheState<E>>,
    capacity: NonZeroUsize,
}

impl<E: Entity> EntityCache<E> {
    /// Creates a cache holding at most `max_entries` entities.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(store: Arc<dyn EntityStore<E>>, max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                loading: HashMap::new(),
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of cached entries, tombstones included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the cached entry without loading or promoting it.
    pub async fn peek(&self, id: &str) -> Option<E> {
        self.state.lock().await.entries.peek(id).cloned()
    }

    /// Returns the entity for `id`, loading it on a miss.
    pub async fn get(&self, id: &str) -> E {
        let cell = {
            let mut state = self.state.lock().await;
            if let Some(entity) = state.entries.get(id) {
                tracing::trace!(kind = %E::KIND, id = %id, "Cache hit");
                return entity.clone();
            }
            state
                .loading
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let entity = cell.get_or_init(|| self.load(id)).await.clone();

        // Only the load still registered for this id may fill the slot; a
        // write or delete that happened meanwhile has already replaced it.
        let mut state = self.state.lock().await;
        let registered = state
            .loading
            .get(id)
            .is_some_and(|pending| Arc::ptr_eq(pending, &cell));
        if registered {
            state.loading.remove(id);
            state.entries.put(id.to_string(), entity.clone());
        }

        entity
    }

    /// Like [`get`](Self::get), reporting whether a real entity was found.
    pub async fn lookup(&self, id: &str) -> Outcome {
        let entity = self.get(id).await;
        if entity.is_empty() {
            Outcome::for_id(Category::FetchFailed, E::KIND.id_field(), id)
        } else {
            Outcome::new(Category::FetchSucceeded, E::KIND.label(), entity)
        }
    }

    /// Inserts a new entity into the store, then into the cache.
    pub async fn put(&self, entity: E) -> Outcome {
        self.write(entity, Write::Insert).await
    }

    /// Overwrites an existing entity in the store, then in the cache.
    pub async fn update(&self, entity: E) -> Outcome {
        self.write(entity, Write::Overwrite).await
    }

    /// Removes an entity from the store and tombstones its cache entry.
    pub async fn delete(&self, id: &str) -> Outcome {
        let result = self.store.remove(id).await;

        {
            let mut state = self.state.lock().await;
            state.loading.remove(id);
            state.entries.put(id.to_string(), E::empty());
        }

        match result {
            Ok(()) => {
                tracing::debug!(kind = %E::KIND, id = %id, "Entity deleted");
                Outcome::for_id(Category::DeleteSucceeded, E::KIND.id_field(), id)
            }
            Err(err) => {
                tracing::warn!(kind = %E::KIND, id = %id, error = %err, "Store delete failed");
                Outcome::for_id(Category::DeleteFailed, E::KIND.id_field(), id)
            }
        }
    }

    async fn load(&self, id: &str) -> E {
        tracing::trace!(kind = %E::KIND, id = %id, "Cache miss");
        match self.store.fetch(id).await {
            Ok(Some(entity)) => entity,
            Ok(None) => {
                tracing::warn!(kind = %E::KIND, id = %id, "Entity not found in store");
                E::empty()
            }
            Err(err) => {
                tracing::warn!(kind = %E::KIND, id = %id, error = %err, "Store fetch failed");
                E::empty()
            }
        }
    }

    async fn write(&self, entity: E, write: Write) -> Outcome {
        let (succeeded, failed) = write.categories();

        if entity.is_empty() {
            tracing::warn!(kind = %E::KIND, "Refusing to write a sentinel entity");
            return Outcome::for_id(failed, E::KIND.id_field(), entity.id());
        }

        let result = match write {
            Write::Insert => self.store.insert(&entity).await,
            Write::Overwrite => self.store.overwrite(&entity).await,
        };

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    state.loading.remove(entity.id());
                    state.entries.put(entity.id().to_string(), entity.clone());
                }
                tracing::debug!(kind = %E::KIND, id = %entity.id(), ?write, "Entity written");
                Outcome::new(succeeded, E::KIND.label(), entity)
            }
            Err(err) => {
                tracing::warn!(
                    kind = %E::KIND,
                    id = %entity.id(),
                    ?write,
                    error = %err,
                    "Store write failed"
                );
                Outcome::for_id(failed, E::KIND.id_field(), entity.id())
            }
        }
    }
}
