use std::env;

const DEFAULT_EVENT_CACHE_MAX_ENTRIES: usize = 10;
const DEFAULT_GROUP_CACHE_MAX_ENTRIES: usize = 100;
const DEFAULT_USER_CACHE_MAX_ENTRIES: usize = 1000;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached events (default: 10)
    pub event_cache_max_entries: usize,
    /// Maximum number of cached groups (default: 100)
    pub group_cache_max_entries: usize,
    /// Maximum number of cached users (default: 1,000)
    pub user_cache_max_entries: usize,
    /// DynamoDB table holding events (default: "grouper-events")
    /// Note: Only used when the `dynamodb` feature is enabled.
    pub events_table: String,
    /// DynamoDB table holding groups (default: "grouper-groups")
    pub groups_table: String,
    /// DynamoDB table holding users (default: "grouper-users")
    pub users_table: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EVENT_CACHE_MAX_ENTRIES` - Cached events (default: 10)
    /// - `GROUP_CACHE_MAX_ENTRIES` - Cached groups (default: 100)
    /// - `USER_CACHE_MAX_ENTRIES` - Cached users (default: 1,000)
    /// - `EVENTS_TABLE_NAME` - Events table (default: "grouper-events")
    /// - `GROUPS_TABLE_NAME` - Groups table (default: "grouper-groups")
    /// - `USERS_TABLE_NAME` - Users table (default: "grouper-users")
    ///
    /// Unparseable or zero sizes fall back to the default.
    pub fn from_env() -> Self {
        Self {
            event_cache_max_entries: capacity_var(
                "EVENT_CACHE_MAX_ENTRIES",
                DEFAULT_EVENT_CACHE_MAX_ENTRIES,
            ),
            group_cache_max_entries: capacity_var(
                "GROUP_CACHE_MAX_ENTRIES",
                DEFAULT_GROUP_CACHE_MAX_ENTRIES,
            ),
            user_cache_max_entries: capacity_var(
                "USER_CACHE_MAX_ENTRIES",
                DEFAULT_USER_CACHE_MAX_ENTRIES,
            ),
            events_table: env::var("EVENTS_TABLE_NAME")
                .unwrap_or_else(|_| "grouper-events".to_string()),
            groups_table: env::var("GROUPS_TABLE_NAME")
                .unwrap_or_else(|_| "grouper-groups".to_string()),
            users_table: env::var("USERS_TABLE_NAME")
                .unwrap_or_else(|_| "grouper-users".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn capacity_var(name: &str, default: usize) -> usize {
    parse_capacity(env::var(name).ok().as_deref(), default)
}

fn parse_capacity(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity(Some("25"), 10), 25);
        assert_eq!(parse_capacity(Some(" 7 "), 10), 7);
        assert_eq!(parse_capacity(Some("0"), 10), 10);
        assert_eq!(parse_capacity(Some("-3"), 10), 10);
        assert_eq!(parse_capacity(Some("lots"), 10), 10);
        assert_eq!(parse_capacity(None, 10), 10);
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("EVENT_CACHE_MAX_ENTRIES");
        env::remove_var("GROUP_CACHE_MAX_ENTRIES");
        env::remove_var("USER_CACHE_MAX_ENTRIES");
        env::remove_var("EVENTS_TABLE_NAME");
        env::remove_var("GROUPS_TABLE_NAME");
        env::remove_var("USERS_TABLE_NAME");

        let config = Config::from_env();

        assert_eq!(config.event_cache_max_entries, 10);
        assert_eq!(config.group_cache_max_entries, 100);
        assert_eq!(config.user_cache_max_entries, 1000);
        assert_eq!(config.events_table, "grouper-events");
        assert_eq!(config.groups_table, "grouper-groups");
        assert_eq!(config.users_table, "grouper-users");
    }
}
