//! DynamoDB storage backend implementation.
//!
//! One table per entity kind, keyed by `eventId`, `groupId` and `userId`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
