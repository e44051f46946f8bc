//! Relationship procedures keeping events, groups and users consistent.
//!
//! Each procedure loads what it needs through the caches, mutates both sides
//! of a relationship and writes every touched entity back. Steps are
//! best-effort: a failed step is recorded in the returned [`CascadeReport`]
//! and the remaining steps still run. There is no rollback.
//!
//! When an entity a step needs loads as the sentinel, that step is skipped
//! and a fetch failure carrying the requested id is recorded in its place.

mod events;
mod groups;
mod users;

use grouper_core::model::{Entity, ModelError};
use grouper_core::outcome::{CascadeReport, Category, Outcome};

use crate::cache::{Caches, EntityCache, EventCache, GroupCache, UserCache};

/// Entry point for every multi-entity procedure.
#[derive(Clone)]
pub struct Coordinator {
    caches: Caches,
}

impl Coordinator {
    pub fn new(caches: Caches) -> Self {
        Self { caches }
    }

    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    fn events(&self) -> &EventCache {
        &self.caches.events
    }

    fn groups(&self) -> &GroupCache {
        &self.caches.groups
    }

    fn users(&self) -> &UserCache {
        &self.caches.users
    }
}

/// Passes `entity` through unless it is the sentinel, in which case a fetch
/// failure for `id` is recorded instead.
fn require<E: Entity>(report: &mut CascadeReport, entity: E, id: &str) -> Option<E> {
    if entity.is_empty() {
        tracing::warn!(kind = %E::KIND, id = %id, "Skipping step for missing entity");
        report.push(fetch_failed::<E>(id));
        None
    } else {
        Some(entity)
    }
}

fn fetch_failed<E: Entity>(id: &str) -> Outcome {
    Outcome::for_id(Category::FetchFailed, E::KIND.id_field(), id)
}

/// Loads an entity, applies a details change and writes it back.
async fn update_details<E: Entity>(
    cache: &EntityCache<E>,
    id: &str,
    apply: impl FnOnce(&mut E) -> Result<(), ModelError> + Send,
) -> Outcome {
    let mut entity = cache.get(id).await;
    if entity.is_empty() {
        return fetch_failed::<E>(id);
    }
    if let Err(err) = apply(&mut entity) {
        tracing::warn!(kind = %E::KIND, id = %id, error = %err, "Rejected details update");
        return Outcome::for_id(Category::UpdateFailed, E::KIND.id_field(), id);
    }
    cache.update(entity).await
}
