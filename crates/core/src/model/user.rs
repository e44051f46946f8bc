use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::{is_empty_id, Entity, EntityKind, EMPTY_ID};
use super::event::validate_id;
use super::{ModelError, SkillSet};

const EMPTY_USER_NAME: &str = "NO_USER_NAME";
const EMPTY_USER_OCCUPATION: &str = "NO_USER_OCCUPATION";

/// A user's group within one event.
///
/// Persisted as the group id, with the sentinel id standing for
/// [`GroupAssignment::Unassigned`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupAssignment {
    /// Enrolled in the event but not in any of its groups.
    Unassigned,
    Assigned(String),
}

impl GroupAssignment {
    pub fn group_id(&self) -> Option<&str> {
        match self {
            GroupAssignment::Unassigned => None,
            GroupAssignment::Assigned(group_id) => Some(group_id),
        }
    }

    pub fn is_group(&self, group_id: &str) -> bool {
        self.group_id() == Some(group_id)
    }
}

impl From<String> for GroupAssignment {
    fn from(group_id: String) -> Self {
        if group_id.is_empty() || is_empty_id(&group_id) {
            GroupAssignment::Unassigned
        } else {
            GroupAssignment::Assigned(group_id)
        }
    }
}

impl From<GroupAssignment> for String {
    fn from(assignment: GroupAssignment) -> Self {
        match assignment {
            GroupAssignment::Unassigned => EMPTY_ID.to_string(),
            GroupAssignment::Assigned(group_id) => group_id,
        }
    }
}

/// Descriptive fields of a user, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub name: String,
    pub occupation: String,
    pub skills: SkillSet,
}

impl UserDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            occupation: String::new(),
            skills: SkillSet::new(),
        }
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = occupation.into();
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName(EntityKind::User));
        }
        Ok(())
    }
}

/// A user and the events (and groups within them) they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    #[serde(flatten)]
    details: UserDetails,
    events: BTreeMap<String, GroupAssignment>,
}

impl User {
    /// Creates a user that is not enrolled in any event.
    pub fn new(id: impl Into<String>, details: UserDetails) -> Result<Self, ModelError> {
        let id = id.into();
        validate_id(&id, EntityKind::User)?;
        details.validate()?;
        Ok(Self {
            id,
            details,
            events: BTreeMap::new(),
        })
    }

    /// Rebuilds a user from a stored record without validation.
    pub fn from_parts(
        id: impl Into<String>,
        details: UserDetails,
        events: impl IntoIterator<Item = (String, GroupAssignment)>,
    ) -> Self {
        Self {
            id: id.into(),
            details,
            events: events.into_iter().collect(),
        }
    }

    pub fn details(&self) -> &UserDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Replaces the descriptive fields, keeping event enrollments.
    pub fn replace_details(&mut self, details: UserDetails) -> Result<(), ModelError> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    pub fn skills_mut(&mut self) -> &mut SkillSet {
        &mut self.details.skills
    }

    /// Event id → group assignment.
    pub fn events(&self) -> &BTreeMap<String, GroupAssignment> {
        &self.events
    }

    pub fn assignment(&self, event_id: &str) -> Option<&GroupAssignment> {
        self.events.get(event_id)
    }

    pub fn is_enrolled(&self, event_id: &str) -> bool {
        self.events.contains_key(event_id)
    }

    /// Enrolls the user in an event without a group.
    ///
    /// An existing enrollment keeps its assignment; returns false in that case.
    pub fn enroll(&mut self, event_id: impl Into<String>) -> bool {
        let event_id = event_id.into();
        if self.events.contains_key(&event_id) {
            return false;
        }
        self.events.insert(event_id, GroupAssignment::Unassigned);
        true
    }

    /// Drops the enrollment, returning the assignment it had.
    pub fn withdraw(&mut self, event_id: &str) -> Option<GroupAssignment> {
        self.events.remove(event_id)
    }

    /// Assigns the user to a group of the event, enrolling if needed.
    ///
    /// Returns the previous assignment for the event.
    pub fn assign_group(
        &mut self,
        event_id: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Option<GroupAssignment> {
        self.events
            .insert(event_id.into(), GroupAssignment::Assigned(group_id.into()))
    }

    /// Resets the event's assignment to [`GroupAssignment::Unassigned`] if it
    /// currently points at `group_id`.
    pub fn unassign_group(&mut self, event_id: &str, group_id: &str) -> bool {
        match self.events.get_mut(event_id) {
            Some(assignment) if assignment.is_group(group_id) => {
                *assignment = GroupAssignment::Unassigned;
                true
            }
            _ => false,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn empty() -> Self {
        Self {
            id: EMPTY_ID.to_string(),
            details: UserDetails {
                name: EMPTY_USER_NAME.to_string(),
                occupation: EMPTY_USER_OCCUPATION.to_string(),
                skills: SkillSet::new(),
            },
            events: BTreeMap::new(),
        }
    }
}
