//! Policy adapter model - where an enforcer's rules are persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::BUILT_IN_OWNER;

/// Storage binding for policy rules, keyed by (owner, name).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PolicyAdapter {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub rule_table: String,
    pub use_same_db: bool,
}

impl PolicyAdapter {
    /// Build a built-in adapter storing rules in `rule_table` of the
    /// platform database.
    pub fn built_in(name: &str, rule_table: &str) -> Self {
        Self {
            owner: BUILT_IN_OWNER.to_string(),
            name: name.to_string(),
            created_utc: Utc::now(),
            rule_table: rule_table.to_string(),
            use_same_db: true,
        }
    }
}
