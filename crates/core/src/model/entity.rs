use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outcome::OutcomeValue;

/// Well-known id carried by every sentinel "empty" entity.
///
/// The sentinel marks a failed load or a deleted record and is never
/// persisted.
pub const EMPTY_ID: &str = "00000000";

/// Returns true if `id` is the sentinel id.
///
/// Compares by value, so ids read from the store or built at runtime are
/// detected the same way as the [`EMPTY_ID`] constant itself.
pub fn is_empty_id(id: &str) -> bool {
    id == EMPTY_ID
}

/// The three persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Event,
    Group,
    User,
}

impl EntityKind {
    /// Human-readable name of the kind.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Event => "Event",
            EntityKind::Group => "Group",
            EntityKind::User => "User",
        }
    }

    /// Name of the id field, as persisted and as reported in outcomes.
    pub fn id_field(self) -> &'static str {
        match self {
            EntityKind::Event => "eventId",
            EntityKind::Group => "groupId",
            EntityKind::User => "userId",
        }
    }

    /// Single-letter prefix of generated ids.
    pub fn id_prefix(self) -> char {
        match self {
            EntityKind::Event => 'E',
            EntityKind::Group => 'G',
            EntityKind::User => 'U',
        }
    }

    /// Generates a fresh opaque id for this kind, e.g. `E3f1c…`.
    pub fn generate_id(self) -> String {
        format!("{}{}", self.id_prefix(), Uuid::new_v4().simple())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted record with an immutable identifier.
///
/// Implemented by [`Event`](super::Event), [`Group`](super::Group) and
/// [`User`](super::User). The cache is generic over this trait.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Send + Sync + Into<OutcomeValue> + 'static
{
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// The sentinel "empty" instance of this kind.
    fn empty() -> Self;

    fn is_empty(&self) -> bool {
        is_empty_id(self.id())
    }
}
