//! Shared test fixtures: a scriptable mock store and sample entities.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;

use grouper_core::model::{
    Entity, Event, EventDetails, Group, GroupDetails, GroupType, NewGroup, User, UserDetails,
};
use grouper_core::storage::{EntityStore, Result, StoreError};

use crate::cache::Caches;
use crate::config::Config;
use crate::coordinator::Coordinator;

/// Mock store that counts calls and fails on demand.
pub(crate) struct MockStore<E: Entity> {
    records: RwLock<HashMap<String, E>>,
    failing_writes: RwLock<HashSet<String>>,
    fail_fetches: AtomicBool,
    fetch_delay: Option<Duration>,
    fetch_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl<E: Entity> MockStore<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            failing_writes: RwLock::new(HashSet::new()),
            fail_fetches: AtomicBool::new(false),
            fetch_delay: None,
            fetch_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Makes every fetch sleep before answering.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Stores a record directly, bypassing call counters.
    pub async fn seed(&self, entity: E) {
        self.records
            .write()
            .await
            .insert(entity.id().to_string(), entity);
    }

    pub async fn record(&self, id: &str) -> Option<E> {
        self.records.read().await.get(id).cloned()
    }

    /// Makes insert, overwrite and remove fail for `id`.
    pub async fn fail_writes_for(&self, id: &str) {
        self.failing_writes.write().await.insert(id.to_string());
    }

    pub fn fail_fetches(&self) {
        self.fail_fetches.store(true, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    async fn check_write(&self, id: &str) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes.read().await.contains(id) {
            return Err(StoreError::Backend(format!("scripted failure for {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MockStore<E> {
    async fn fetch(&self, id: &str) -> Result<Option<E>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("scripted fetch failure".to_string()));
        }
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert(&self, entity: &E) -> Result<()> {
        self.check_write(entity.id()).await?;
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
        self.check_write(entity.id()).await?;
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
        self.check_write(id).await?;
        match self.records.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            }),
        }
    }
}

/// A coordinator over mock stores, with the stores kept for inspection.
pub(crate) struct Harness {
    pub events: Arc<MockStore<Event>>,
    pub groups: Arc<MockStore<Group>>,
    pub users: Arc<MockStore<User>>,
    pub coordinator: Coordinator,
}

impl Harness {
    pub fn new() -> Self {
        let events = Arc::new(MockStore::new());
        let groups = Arc::new(MockStore::new());
        let users = Arc::new(MockStore::new());
        let caches = Caches::from_config(
            &test_config(),
            events.clone(),
            groups.clone(),
            users.clone(),
        );
        Self {
            events,
            groups,
            users,
            coordinator: Coordinator::new(caches),
        }
    }
}

pub(crate) fn test_config() -> Config {
    Config {
        event_cache_max_entries: 10,
        group_cache_max_entries: 100,
        user_cache_max_entries: 1000,
        events_table: "grouper-events".to_string(),
        groups_table: "grouper-groups".to_string(),
        users_table: "grouper-users".to_string(),
    }
}

pub(crate) fn sample_event(id: &str) -> Event {
    let date = Utc.with_ymd_and_hms(2024, 4, 6, 9, 0, 0).unwrap();
    Event::new(
        id,
        EventDetails::new(format!("Event {id}"), date).with_location("Los Angeles"),
    )
    .unwrap()
}

pub(crate) fn sample_user(id: &str) -> User {
    User::new(id, UserDetails::new(format!("User {id}")).with_occupation("Student")).unwrap()
}

pub(crate) fn sample_group(id: &str, event_id: &str, owner_id: &str) -> Group {
    Group::new(
        id,
        NewGroup {
            details: GroupDetails::new(format!("Group {id}"), GroupType::Hackathon),
            event_id: event_id.to_string(),
            owner_id: owner_id.to_string(),
        },
    )
    .unwrap()
}
