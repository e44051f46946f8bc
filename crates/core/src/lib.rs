//! Core domain for grouper.
//!
//! Pure types and contracts shared by the cache and the relationship
//! coordinator: entity records, the skill vocabulary, the caller-facing
//! [`outcome::Outcome`] and the [`storage::EntityStore`] adapter trait.
//! Nothing in this crate performs I/O.

pub mod model;
pub mod outcome;
pub mod storage;
