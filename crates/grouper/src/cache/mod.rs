//! Write-through entity caches.
//!
//! One bounded cache per entity kind sits in front of that kind's store:
//!
//! - **Reads**: served from the cache; misses load once per key and cache
//!   the result, including the "empty" sentinel for ids that do not exist
//! - **Writes**: persisted to the store first, cached only on success
//! - **Deletes**: always leave a sentinel behind
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::<Event>::new());
//! let events = EventCache::new(store, 10);
//! let event = events.get("E1").await;
//! ```

mod entity_cache;

use std::sync::Arc;

use grouper_core::model::{Event, Group, User};
use grouper_core::storage::EntityStore;

use crate::config::Config;

pub use entity_cache::EntityCache;

pub type EventCache = EntityCache<Event>;
pub type GroupCache = EntityCache<Group>;
pub type UserCache = EntityCache<User>;

/// The three process-wide caches, shared by every caller.
#[derive(Clone)]
pub struct Caches {
    pub events: Arc<EventCache>,
    pub groups: Arc<GroupCache>,
    pub users: Arc<UserCache>,
}

impl Caches {
    /// Builds one cache per store, sized from `config`.
    pub fn from_config(
        config: &Config,
        events: Arc<dyn EntityStore<Event>>,
        groups: Arc<dyn EntityStore<Group>>,
        users: Arc<dyn EntityStore<User>>,
    ) -> Self {
        tracing::debug!(
            events = config.event_cache_max_entries,
            groups = config.group_cache_max_entries,
            users = config.user_cache_max_entries,
            "Creating entity caches"
        );
        Self {
            events: Arc::new(EntityCache::new(events, config.event_cache_max_entries)),
            groups: Arc::new(EntityCache::new(groups, config.group_cache_max_entries)),
            users: Arc::new(EntityCache::new(users, config.user_cache_max_entries)),
        }
    }
}
