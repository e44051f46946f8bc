//! In-memory storage backend.
//!
//! Records live in a `HashMap` wrapped in `Arc<RwLock<_>>`, one store per
//! entity kind. Nothing is persisted; data is lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use grouper::storage::inmemory::InMemoryStore;
//!
//! let events = Arc::new(InMemoryStore::<Event>::new());
//! ```

mod store;

pub use store::InMemoryStore;
