//! Policy enforcer model - a named (model, adapter) composition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::BUILT_IN_OWNER;

/// Enforcer entity, keyed by (owner, name). Carries no logic of its own;
/// `model` and `adapter` are `owner/name` references to a [`PolicyModel`]
/// and a [`PolicyAdapter`].
///
/// [`PolicyModel`]: super::PolicyModel
/// [`PolicyAdapter`]: super::PolicyAdapter
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PolicyEnforcer {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub display_name: String,
    pub model: String,
    pub adapter: String,
}

impl PolicyEnforcer {
    /// Build a built-in enforcer referencing a model and an adapter by their
    /// `owner/name` keys.
    pub fn built_in(name: &str, display_name: &str, model: &str, adapter: &str) -> Self {
        Self {
            owner: BUILT_IN_OWNER.to_string(),
            name: name.to_string(),
            created_utc: Utc::now(),
            display_name: display_name.to_string(),
            model: model.to_string(),
            adapter: adapter.to_string(),
        }
    }
}
