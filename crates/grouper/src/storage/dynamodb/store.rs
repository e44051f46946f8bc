//! DynamoDB store implementation.
//!
//! Implements `EntityStore` from `grouper_core::storage` for every entity kind.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use grouper_core::model::EntityKind;
use grouper_core::storage::{EntityStore, Result, StoreError};

use super::conversions::ItemCodec;
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error};
use crate::config::Config;

/// DynamoDB-based store for events, groups and users.
///
/// A single instance serves all three kinds; wrap it in an `Arc` and hand
/// it to each cache.
pub struct DynamoDbStore {
    client: Client,
    events_table: String,
    groups_table: String,
    users_table: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table names.
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            events_table: config.events_table.clone(),
            groups_table: config.groups_table.clone(),
            users_table: config.users_table.clone(),
        }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain; table names come from
    /// `config`.
    pub async fn from_env(config: &Config) -> Result<Self> {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        if sdk_config.region().is_none() {
            return Err(StoreError::Unavailable(
                "No AWS region configured".to_string(),
            ));
        }
        let client = Client::new(&sdk_config);

        Ok(Self::new(client, config))
    }

    /// Get the table holding `kind`.
    pub fn table_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Event => &self.events_table,
            EntityKind::Group => &self.groups_table,
            EntityKind::User => &self.users_table,
        }
    }
}

#[async_trait]
impl<E: ItemCodec> EntityStore<E> for DynamoDbStore {
    async fn fetch(&self, id: &str) -> Result<Option<E>> {
        let result = self
            .client
            .get_item()
            .table_name(self.table_name(E::KIND))
            .key(E::KEY, AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(E::from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, entity: &E) -> Result<()> {
        self.client
            .put_item()
            .table_name(self.table_name(E::KIND))
            .set_item(Some(entity.to_item()))
            .condition_expression("attribute_not_exists(#key)")
            .expression_attribute_names("#key", E::KEY)
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(
                    e,
                    StoreError::AlreadyExists {
                        kind: E::KIND,
                        id: entity.id().to_string(),
                    },
                )
            })?;

        Ok(())
    }

    async fn overwrite(&self, entity: &E) -> Result<()> {
        self.client
            .put_item()
            .table_name(self.table_name(E::KIND))
            .set_item(Some(entity.to_item()))
            .condition_expression("attribute_exists(#key)")
            .expression_attribute_names("#key", E::KEY)
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(
                    e,
                    StoreError::NotFound {
                        kind: E::KIND,
                        id: entity.id().to_string(),
                    },
                )
            })?;

        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(self.table_name(E::KIND))
            .key(E::KEY, AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(#key)")
            .expression_attribute_names("#key", E::KEY)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, E::KIND, id))?;

        Ok(())
    }
}
