use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{is_empty_id, Entity, EntityKind, EMPTY_ID};
use super::ModelError;

const EMPTY_EVENT_NAME: &str = "NO_EVENT_NAME";
const EMPTY_EVENT_LOCATION: &str = "NO_EVENT_LOCATION";
const EMPTY_EVENT_DESCRIPTION: &str = "NO_EVENT_DESCRIPTION";

/// Descriptive fields of an event, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub name: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

impl EventDetails {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            date,
            location: String::new(),
            description: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName(EntityKind::Event));
        }
        Ok(())
    }
}

/// An event that groups and users enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: String,
    #[serde(flatten)]
    details: EventDetails,
    groups: BTreeSet<String>,
    users: BTreeSet<String>,
}

impl Event {
    /// Creates a new event with no groups or users.
    pub fn new(id: impl Into<String>, details: EventDetails) -> Result<Self, ModelError> {
        let id = id.into();
        validate_id(&id, EntityKind::Event)?;
        details.validate()?;
        Ok(Self {
            id,
            details,
            groups: BTreeSet::new(),
            users: BTreeSet::new(),
        })
    }

    /// Rebuilds an event from a stored record without validation.
    pub fn from_parts(
        id: impl Into<String>,
        details: EventDetails,
        groups: impl IntoIterator<Item = String>,
        users: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            details,
            groups: groups.into_iter().collect(),
            users: users.into_iter().collect(),
        }
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.details.date
    }

    /// Replaces the descriptive fields, keeping groups and users.
    pub fn replace_details(&mut self, details: EventDetails) -> Result<(), ModelError> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn users(&self) -> &BTreeSet<String> {
        &self.users
    }

    pub fn has_group(&self, group_id: &str) -> bool {
        self.groups.contains(group_id)
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.users.contains(user_id)
    }

    /// Returns false if the group was already listed.
    pub fn add_group(&mut self, group_id: impl Into<String>) -> bool {
        self.groups.insert(group_id.into())
    }

    pub fn remove_group(&mut self, group_id: &str) -> bool {
        self.groups.remove(group_id)
    }

    /// Returns false if the user was already enrolled.
    pub fn add_user(&mut self, user_id: impl Into<String>) -> bool {
        self.users.insert(user_id.into())
    }

    pub fn remove_user(&mut self, user_id: &str) -> bool {
        self.users.remove(user_id)
    }
}

impl Entity for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> &str {
        &self.id
    }

    fn empty() -> Self {
        Self {
            id: EMPTY_ID.to_string(),
            details: EventDetails {
                name: EMPTY_EVENT_NAME.to_string(),
                date: DateTime::<Utc>::UNIX_EPOCH,
                location: EMPTY_EVENT_LOCATION.to_string(),
                description: EMPTY_EVENT_DESCRIPTION.to_string(),
            },
            groups: BTreeSet::new(),
            users: BTreeSet::new(),
        }
    }
}

pub(super) fn validate_id(id: &str, kind: EntityKind) -> Result<(), ModelError> {
    if id.trim().is_empty() {
        return Err(ModelError::EmptyId(kind));
    }
    if is_empty_id(id) {
        return Err(ModelError::ReservedId(kind));
    }
    Ok(())
}
