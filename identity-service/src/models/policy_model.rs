//! Policy model - an authorization-model grammar definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::BUILT_IN_OWNER;

/// Authorization model entity, keyed by (owner, name). The `model_text`
/// carries the policy-language grammar parsed by the downstream evaluator;
/// it must be reproduced exactly.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PolicyModel {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub display_name: String,
    pub model_text: String,
}

impl PolicyModel {
    /// Build a built-in model owned by the built-in organization.
    pub fn built_in(name: &str, display_name: &str, model_text: &str) -> Self {
        Self {
            owner: BUILT_IN_OWNER.to_string(),
            name: name.to_string(),
            created_utc: Utc::now(),
            display_name: display_name.to_string(),
            model_text: model_text.to_string(),
        }
    }
}
