//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.
//!
//! Id collections are string sets, omitted when empty because DynamoDB
//! rejects empty sets. Event dates are stored as RFC 3339 at second precision.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use grouper_core::model::{
    Entity, Event, EventDetails, Group, GroupAssignment, GroupDetails, GroupType, SkillSet,
    User, UserDetails,
};
use grouper_core::storage::StoreError;

pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Attribute names
// ============================================================================

pub const EVENT_ID: &str = "eventId";
const EVENT_NAME: &str = "eventName";
const EVENT_DATE: &str = "eventDate";
const EVENT_LOCATION: &str = "eventLocation";
const EVENT_DESCRIPTION: &str = "eventDescription";
const EVENT_GROUPS: &str = "eventGroups";
const EVENT_USERS: &str = "eventUsers";

pub const GROUP_ID: &str = "groupId";
const GROUP_NAME: &str = "groupName";
const GROUP_TYPE: &str = "groupType";
const GROUP_DESCRIPTION: &str = "groupDescription";
const GROUP_EVENT: &str = "groupEvent";
const GROUP_OWNER: &str = "groupOwner";
const GROUP_SKILLS: &str = "groupSkillSet";
const GROUP_USERS: &str = "groupUsers";

pub const USER_ID: &str = "userId";
const USER_NAME: &str = "userName";
const USER_OCCUPATION: &str = "userOccupation";
const USER_SKILLS: &str = "userSkillSet";
const USER_EVENTS: &str = "userEventMap";

/// An entity with a DynamoDB item layout.
pub trait ItemCodec: Entity + Sized {
    /// Partition key attribute of the entity's table.
    const KEY: &'static str;

    fn to_item(&self) -> Item;

    fn from_item(item: &Item) -> Result<Self, StoreError>;
}

impl ItemCodec for Event {
    const KEY: &'static str = EVENT_ID;

    fn to_item(&self) -> Item {
        event_to_item(self)
    }

    fn from_item(item: &Item) -> Result<Self, StoreError> {
        item_to_event(item)
    }
}

impl ItemCodec for Group {
    const KEY: &'static str = GROUP_ID;

    fn to_item(&self) -> Item {
        group_to_item(self)
    }

    fn from_item(item: &Item) -> Result<Self, StoreError> {
        item_to_group(item)
    }
}

impl ItemCodec for User {
    const KEY: &'static str = USER_ID;

    fn to_item(&self) -> Item {
        user_to_item(self)
    }

    fn from_item(item: &Item) -> Result<Self, StoreError> {
        item_to_user(item)
    }
}

// ============================================================================
// Event conversions
// ============================================================================

/// Convert an Event to DynamoDB item.
pub fn event_to_item(event: &Event) -> Item {
    let details = event.details();
    let mut item = HashMap::new();

    item.insert(EVENT_ID.to_string(), AttributeValue::S(event.id().to_string()));
    item.insert(EVENT_NAME.to_string(), AttributeValue::S(details.name.clone()));
    item.insert(
        EVENT_DATE.to_string(),
        AttributeValue::S(details.date.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    item.insert(
        EVENT_LOCATION.to_string(),
        AttributeValue::S(details.location.clone()),
    );
    item.insert(
        EVENT_DESCRIPTION.to_string(),
        AttributeValue::S(details.description.clone()),
    );
    insert_string_set(&mut item, EVENT_GROUPS, event.groups());
    insert_string_set(&mut item, EVENT_USERS, event.users());

    item
}

/// Convert a DynamoDB item to Event.
pub fn item_to_event(item: &Item) -> Result<Event, StoreError> {
    let details = EventDetails {
        name: get_string(item, EVENT_NAME)?,
        date: get_datetime(item, EVENT_DATE)?,
        location: get_optional_string(item, EVENT_LOCATION).unwrap_or_default(),
        description: get_optional_string(item, EVENT_DESCRIPTION).unwrap_or_default(),
    };

    Ok(Event::from_parts(
        get_string(item, EVENT_ID)?,
        details,
        get_string_set(item, EVENT_GROUPS),
        get_string_set(item, EVENT_USERS),
    ))
}

// ============================================================================
// Group conversions
// ============================================================================

/// Convert a Group to DynamoDB item.
pub fn group_to_item(group: &Group) -> Item {
    let details = group.details();
    let mut item = HashMap::new();

    item.insert(GROUP_ID.to_string(), AttributeValue::S(group.id().to_string()));
    item.insert(GROUP_NAME.to_string(), AttributeValue::S(details.name.clone()));
    item.insert(
        GROUP_TYPE.to_string(),
        AttributeValue::S(details.group_type.as_str().to_string()),
    );
    item.insert(
        GROUP_DESCRIPTION.to_string(),
        AttributeValue::S(details.description.clone()),
    );
    item.insert(
        GROUP_EVENT.to_string(),
        AttributeValue::S(group.event_id().to_string()),
    );
    item.insert(
        GROUP_OWNER.to_string(),
        AttributeValue::S(group.owner_id().to_string()),
    );
    item.insert(GROUP_SKILLS.to_string(), skills_to_attribute(&details.skills));
    insert_string_set(&mut item, GROUP_USERS, group.members());

    item
}

/// Convert a DynamoDB item to Group.
pub fn item_to_group(item: &Item) -> Result<Group, StoreError> {
    let group_type = get_string(item, GROUP_TYPE)?
        .parse::<GroupType>()
        .map_err(|e| StoreError::InvalidData(format!("Invalid field {}: {}", GROUP_TYPE, e)))?;

    let details = GroupDetails {
        name: get_string(item, GROUP_NAME)?,
        group_type,
        description: get_optional_string(item, GROUP_DESCRIPTION).unwrap_or_default(),
        skills: get_skills(item, GROUP_SKILLS)?,
    };

    Ok(Group::from_parts(
        get_string(item, GROUP_ID)?,
        details,
        get_string(item, GROUP_EVENT)?,
        get_string(item, GROUP_OWNER)?,
        get_string_set(item, GROUP_USERS),
    ))
}

// ============================================================================
// User conversions
// ============================================================================

/// Convert a User to DynamoDB item.
pub fn user_to_item(user: &User) -> Item {
    let details = user.details();
    let mut item = HashMap::new();

    item.insert(USER_ID.to_string(), AttributeValue::S(user.id().to_string()));
    item.insert(USER_NAME.to_string(), AttributeValue::S(details.name.clone()));
    item.insert(
        USER_OCCUPATION.to_string(),
        AttributeValue::S(details.occupation.clone()),
    );
    item.insert(USER_SKILLS.to_string(), skills_to_attribute(&details.skills));

    let events = user
        .events()
        .iter()
        .map(|(event_id, assignment)| {
            (
                event_id.clone(),
                AttributeValue::S(String::from(assignment.clone())),
            )
        })
        .collect();
    item.insert(USER_EVENTS.to_string(), AttributeValue::M(events));

    item
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &Item) -> Result<User, StoreError> {
    let details = UserDetails {
        name: get_string(item, USER_NAME)?,
        occupation: get_optional_string(item, USER_OCCUPATION).unwrap_or_default(),
        skills: get_skills(item, USER_SKILLS)?,
    };

    let events = match item.get(USER_EVENTS) {
        Some(value) => value
            .as_m()
            .map_err(|_| invalid_field(USER_EVENTS))?
            .iter()
            .map(|(event_id, value)| {
                value
                    .as_s()
                    .map(|group_id| (event_id.clone(), GroupAssignment::from(group_id.clone())))
                    .map_err(|_| invalid_field(USER_EVENTS))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(User::from_parts(get_string(item, USER_ID)?, details, events))
}

// ============================================================================
// Helpers
// ============================================================================

fn invalid_field(key: &str) -> StoreError {
    StoreError::InvalidData(format!("Missing or invalid field: {}", key))
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| invalid_field(key))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a string set attribute; a missing attribute is an empty set.
fn get_string_set(item: &Item, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_ss().ok())
        .cloned()
        .unwrap_or_default()
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, StoreError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

/// Get a skill map attribute; a missing attribute is an all-false set.
fn get_skills(item: &Item, key: &str) -> Result<SkillSet, StoreError> {
    let Some(value) = item.get(key) else {
        return Ok(SkillSet::new());
    };
    let flags = value
        .as_m()
        .map_err(|_| invalid_field(key))?
        .iter()
        .map(|(name, flag)| {
            flag.as_bool()
                .map(|flag| (name.as_str(), *flag))
                .map_err(|_| invalid_field(key))
        })
        .collect::<Result<Vec<_>, _>>()?;

    SkillSet::from_flags(flags)
        .map_err(|e| StoreError::InvalidData(format!("Invalid field {}: {}", key, e)))
}

fn skills_to_attribute(skills: &SkillSet) -> AttributeValue {
    AttributeValue::M(
        skills
            .iter()
            .map(|(skill, flag)| (skill.as_str().to_string(), AttributeValue::Bool(flag)))
            .collect(),
    )
}

fn insert_string_set<'a>(
    item: &mut Item,
    key: &str,
    values: impl IntoIterator<Item = &'a String>,
) {
    let values: Vec<String> = values.into_iter().cloned().collect();
    if !values.is_empty() {
        item.insert(key.to_string(), AttributeValue::Ss(values));
    }
}
