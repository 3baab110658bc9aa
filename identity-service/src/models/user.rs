//! User model - accounts scoped under an organization.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::config::AdminSeed;

use super::{ADMIN_USER_NAME, BUILT_IN_APPLICATION_NAME, BUILT_IN_OWNER};

/// User entity, keyed by (owner, name). The owner is the organization the
/// user belongs to.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub id: Uuid,
    pub user_type: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub address: Json<Vec<String>>,
    pub tag: String,
    pub score: i32,
    pub ranking: i32,
    pub is_admin: bool,
    pub is_forbidden: bool,
    pub is_deleted: bool,
    pub signup_application: String,
    pub created_ip: String,
    pub properties: Json<HashMap<String, String>>,
}

impl User {
    /// Build the built-in administrator (`built-in/admin`) from seed values.
    ///
    /// The password is stored exactly as supplied, empty included; the caller
    /// is responsible for flagging suspicious values.
    pub fn built_in_admin(seed: &AdminSeed) -> Self {
        Self {
            owner: BUILT_IN_OWNER.to_string(),
            name: ADMIN_USER_NAME.to_string(),
            created_utc: Utc::now(),
            id: Uuid::new_v4(),
            user_type: "normal-user".to_string(),
            password: seed.password.clone(),
            display_name: "Admin".to_string(),
            email: seed.email.clone(),
            phone: seed.phone.clone(),
            country_code: "SG".to_string(),
            address: Json(Vec::new()),
            tag: "staff".to_string(),
            score: 2000,
            ranking: 1,
            is_admin: true,
            is_forbidden: false,
            is_deleted: false,
            signup_application: BUILT_IN_APPLICATION_NAME.to_string(),
            created_ip: seed.created_ip.clone(),
            properties: Json(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_admin_flags() {
        let seed = AdminSeed {
            password: "secret".to_string(),
            email: "admin@example.com".to_string(),
            phone: "+6500000000".to_string(),
            created_ip: "127.0.0.1".to_string(),
        };
        let user = User::built_in_admin(&seed);
        assert_eq!(user.owner, "built-in");
        assert_eq!(user.name, "admin");
        assert!(user.is_admin);
        assert!(!user.is_forbidden);
        assert!(!user.is_deleted);
        assert_eq!(user.signup_application, "app-built-in");
        assert_eq!(user.ranking, 1);
    }

    #[test]
    fn built_in_admin_ids_are_unique() {
        let seed = AdminSeed {
            password: String::new(),
            email: String::new(),
            phone: String::new(),
            created_ip: String::new(),
        };
        let a = User::built_in_admin(&seed);
        let b = User::built_in_admin(&seed);
        assert_ne!(a.id, b.id);
    }
}
