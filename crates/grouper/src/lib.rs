//! Cached entity store and relationship coordinator for grouper.
//!
//! Events, groups and users each sit behind a bounded write-through
//! [`cache::EntityCache`]; the [`coordinator::Coordinator`] keeps the
//! relationships between them consistent on both sides.

pub mod cache;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod storage;

#[cfg(test)]
mod testing;
