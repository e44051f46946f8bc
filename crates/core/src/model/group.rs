use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, EMPTY_ID};
use super::event::validate_id;
use super::{ModelError, SkillSet};

const EMPTY_GROUP_NAME: &str = "NO_GROUP_NAME";
const EMPTY_GROUP_DESCRIPTION: &str = "NO_GROUP_DESCRIPTION";

/// What a group is formed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
    #[serde(rename = "PROJECT_GROUP_TYPE")]
    Project,
    #[serde(rename = "HACKATHON_GROUP_TYPE")]
    Hackathon,
    #[serde(rename = "STARTUP_GROUP_TYPE")]
    Startup,
}

impl GroupType {
    /// Persisted name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupType::Project => "PROJECT_GROUP_TYPE",
            GroupType::Hackathon => "HACKATHON_GROUP_TYPE",
            GroupType::Startup => "STARTUP_GROUP_TYPE",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = ModelError;

    /// Accepts the persisted names and the short lowercase forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROJECT_GROUP_TYPE" | "project" => Ok(GroupType::Project),
            "HACKATHON_GROUP_TYPE" | "hackathon" => Ok(GroupType::Hackathon),
            "STARTUP_GROUP_TYPE" | "startup" => Ok(GroupType::Startup),
            other => Err(ModelError::UnknownGroupType(other.to_string())),
        }
    }
}

/// Descriptive fields of a group, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    pub name: String,
    pub group_type: GroupType,
    pub description: String,
    pub skills: SkillSet,
}

impl GroupDetails {
    pub fn new(name: impl Into<String>, group_type: GroupType) -> Self {
        Self {
            name: name.into(),
            group_type,
            description: String::new(),
            skills: SkillSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName(EntityKind::Group));
        }
        Ok(())
    }
}

/// Everything needed to create a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub details: GroupDetails,
    pub event_id: String,
    pub owner_id: String,
}

/// A group formed under exactly one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    id: String,
    #[serde(flatten)]
    details: GroupDetails,
    event_id: String,
    owner_id: String,
    members: BTreeSet<String>,
}

impl Group {
    /// Creates a group with no members.
    ///
    /// The event and owner ids are required and fixed for the group's life.
    pub fn new(id: impl Into<String>, new: NewGroup) -> Result<Self, ModelError> {
        let id = id.into();
        validate_id(&id, EntityKind::Group)?;
        new.details.validate()?;
        if new.event_id.trim().is_empty() || new.event_id == EMPTY_ID {
            return Err(ModelError::MissingEvent);
        }
        if new.owner_id.trim().is_empty() || new.owner_id == EMPTY_ID {
            return Err(ModelError::MissingOwner);
        }
        Ok(Self {
            id,
            details: new.details,
            event_id: new.event_id,
            owner_id: new.owner_id,
            members: BTreeSet::new(),
        })
    }

    /// Rebuilds a group from a stored record without validation.
    pub fn from_parts(
        id: impl Into<String>,
        details: GroupDetails,
        event_id: impl Into<String>,
        owner_id: impl Into<String>,
        members: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            details,
            event_id: event_id.into(),
            owner_id: owner_id.into(),
            members: members.into_iter().collect(),
        }
    }

    pub fn details(&self) -> &GroupDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Replaces the descriptive fields, keeping event, owner and members.
    pub fn replace_details(&mut self, details: GroupDetails) -> Result<(), ModelError> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn skills_mut(&mut self) -> &mut SkillSet {
        &mut self.details.skills
    }

    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.contains(user_id)
    }

    pub fn add_member(&mut self, user_id: impl Into<String>) -> bool {
        self.members.insert(user_id.into())
    }

    pub fn remove_member(&mut self, user_id: &str) -> bool {
        self.members.remove(user_id)
    }
}

impl Entity for Group {
    const KIND: EntityKind = EntityKind::Group;

    fn id(&self) -> &str {
        &self.id
    }

    fn empty() -> Self {
        Self {
            id: EMPTY_ID.to_string(),
            details: GroupDetails {
                name: EMPTY_GROUP_NAME.to_string(),
                group_type: GroupType::Project,
                description: EMPTY_GROUP_DESCRIPTION.to_string(),
                skills: SkillSet::new(),
            },
            event_id: EMPTY_ID.to_string(),
            owner_id: EMPTY_ID.to_string(),
            members: BTreeSet::new(),
        }
    }
}
