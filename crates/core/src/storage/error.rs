use thiserror::Error;

use crate::model::EntityKind;

/// Errors reported by a store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store request failed: {0}")]
    Backend(String),
    #[error("Invalid record: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
