use thiserror::Error;

use super::EntityKind;

/// Errors raised when constructing or editing entities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} id cannot be empty")]
    EmptyId(EntityKind),
    #[error("{0} id cannot be the sentinel id")]
    ReservedId(EntityKind),
    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),
    #[error("Group requires an owning event id")]
    MissingEvent,
    #[error("Group requires an owner user id")]
    MissingOwner,
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
    #[error("Unknown group type: {0}")]
    UnknownGroupType(String),
}
