//! Table configuration types (Functional Core - pure data).

use grouper::config::Config;
use grouper_core::model::EntityKind;

/// Schema of one entity table: a single string partition key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: String,
    pub billing_mode: BillingMode,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    fn for_kind(kind: EntityKind, table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            partition_key: kind.id_field().to_string(),
            billing_mode: BillingMode::PayPerRequest,
        }
    }
}

/// Returns the event, group and user table configurations.
/// This is a pure function - no I/O.
pub fn grouper_table_configs(config: &Config) -> Vec<TableConfig> {
    vec![
        TableConfig::for_kind(EntityKind::Event, &config.events_table),
        TableConfig::for_kind(EntityKind::Group, &config.groups_table),
        TableConfig::for_kind(EntityKind::User, &config.users_table),
    ]
}
