//! Outcomes reported by cache operations and relationship procedures.
//!
//! Every cache call yields an [`Outcome`]; multi-step procedures collect them
//! in a [`CascadeReport`] so partial failures stay visible step by step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Event, Group, User};

/// What happened, as a success/failure pair per store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FetchSucceeded,
    FetchFailed,
    PutSucceeded,
    PutFailed,
    UpdateSucceeded,
    UpdateFailed,
    DeleteSucceeded,
    DeleteFailed,
}

impl Category {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Category::FetchSucceeded
                | Category::PutSucceeded
                | Category::UpdateSucceeded
                | Category::DeleteSucceeded
        )
    }

    /// Human-readable description of the category.
    pub fn description(self) -> &'static str {
        match self {
            Category::FetchSucceeded => "fetch succeeded",
            Category::FetchFailed => {
                "fetch failed: the entry may not exist or the key may be invalid"
            }
            Category::PutSucceeded => "write succeeded",
            Category::PutFailed => {
                "write failed: an entry may already exist under the key or the record was rejected"
            }
            Category::UpdateSucceeded => "update succeeded",
            Category::UpdateFailed => {
                "update failed: the entry may not exist or the record was rejected"
            }
            Category::DeleteSucceeded => "delete succeeded",
            Category::DeleteFailed => "delete failed: the entry may not exist",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The value an outcome refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutcomeValue {
    Id(String),
    Event(Event),
    Group(Group),
    User(User),
}

impl From<Event> for OutcomeValue {
    fn from(event: Event) -> Self {
        OutcomeValue::Event(event)
    }
}

impl From<Group> for OutcomeValue {
    fn from(group: Group) -> Self {
        OutcomeValue::Group(group)
    }
}

impl From<User> for OutcomeValue {
    fn from(user: User) -> Self {
        OutcomeValue::User(user)
    }
}

/// Result of a single cache operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub category: Category,
    /// Name of the field implicated, e.g. `groupId` or `Group`.
    pub field: String,
    pub value: OutcomeValue,
}

impl Outcome {
    pub fn new(category: Category, field: impl Into<String>, value: impl Into<OutcomeValue>) -> Self {
        Self {
            success: category.is_success(),
            category,
            field: field.into(),
            value: value.into(),
        }
    }

    /// An outcome whose value is an id.
    pub fn for_id(category: Category, field: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(category, field, OutcomeValue::Id(id.into()))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The id the outcome refers to, when its value is an id.
    pub fn id(&self) -> Option<&str> {
        match &self.value {
            OutcomeValue::Id(id) => Some(id),
            _ => None,
        }
    }
}

/// Per-step outcomes of a multi-entity procedure, in execution order.
///
/// Never collapsed into a single pass/fail: callers inspect the steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CascadeReport {
    steps: Vec<Outcome>,
}

impl CascadeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.steps.push(outcome);
    }

    pub fn steps(&self) -> &[Outcome] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Outcome> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when every step succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(Outcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.steps.iter().filter(|o| !o.is_success())
    }

    /// Steps whose category is `category`.
    pub fn with_category(&self, category: Category) -> impl Iterator<Item = &Outcome> {
        self.steps.iter().filter(move |o| o.category == category)
    }
}

impl Extend<Outcome> for CascadeReport {
    fn extend<T: IntoIterator<Item = Outcome>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_follows_category() {
        let ok = Outcome::for_id(Category::DeleteSucceeded, "groupId", "G1");
        let failed = Outcome::for_id(Category::UpdateFailed, "userId", "U2");

        assert!(ok.is_success());
        assert!(!failed.is_success());
        assert_eq!(failed.id(), Some("U2"));
    }

    #[test]
    fn test_report_keeps_every_step() {
        let mut report = CascadeReport::new();
        report.push(Outcome::for_id(Category::UpdateSucceeded, "eventId", "E1"));
        report.push(Outcome::for_id(Category::UpdateFailed, "userId", "U2"));
        report.push(Outcome::for_id(Category::DeleteSucceeded, "groupId", "G1"));

        assert_eq!(report.len(), 3);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.with_category(Category::UpdateSucceeded).count(), 1);
    }

    #[test]
    fn test_value_is_tagged_in_json() {
        let outcome = Outcome::for_id(Category::FetchFailed, "eventId", "E404");
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["category"], "fetch_failed");
        assert_eq!(json["value"]["kind"], "id");
        assert_eq!(json["value"]["value"], "E404");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::PutSucceeded.to_string(), "write succeeded");
        assert_eq!(
            Category::DeleteFailed.to_string(),
            "delete failed: the entry may not exist"
        );
    }
}
