//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! `grouper_core::storage::EntityStore`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local `HashMap`s, for development and tests
//! - `dynamodb`: AWS DynamoDB, one table per entity kind
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p grouper --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p grouper --features dynamodb"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

use std::sync::Arc;

#[cfg(feature = "inmemory")]
use grouper_core::model::{Event, Group, User};
use grouper_core::storage::Result;

use crate::cache::Caches;
use crate::config::Config;

/// Opens the compiled-in backend and builds the caches in front of it.
#[cfg(feature = "inmemory")]
pub async fn open_caches(config: &Config) -> Result<Caches> {
    tracing::info!(
        "Using in-memory storage; stores start empty and records from earlier runs are not visible"
    );
    Ok(Caches::from_config(
        config,
        Arc::new(InMemoryStore::<Event>::new()),
        Arc::new(InMemoryStore::<Group>::new()),
        Arc::new(InMemoryStore::<User>::new()),
    ))
}

/// Opens the compiled-in backend and builds the caches in front of it.
#[cfg(feature = "dynamodb")]
pub async fn open_caches(config: &Config) -> Result<Caches> {
    tracing::info!(
        events = %config.events_table,
        groups = %config.groups_table,
        users = %config.users_table,
        "Using DynamoDB storage"
    );
    let store = Arc::new(DynamoDbStore::from_env(config).await?);
    Ok(Caches::from_config(config, store.clone(), store.clone(), store))
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::testing::{sample_user, test_config};

    #[tokio::test]
    async fn test_open_caches_sizes_each_cache() {
        let caches = open_caches(&test_config()).await.unwrap();

        assert_eq!(caches.events.capacity(), 10);
        assert_eq!(caches.groups.capacity(), 100);
        assert_eq!(caches.users.capacity(), 1000);

        let outcome = caches.users.put(sample_user("U1")).await;
        assert!(outcome.is_success());
        assert_eq!(caches.users.get("U1").await, sample_user("U1"));
    }
}
