//! Organization model - the top-level tenant of the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::config::OrganizationSeed;

use super::{ADMIN_OWNER, BUILT_IN_ORGANIZATION_NAME};

/// One row of an organization's account-field table: who may see and who may
/// change a given profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountItem {
    pub name: String,
    pub visible: bool,
    pub view_rule: String,
    pub modify_rule: String,
}

impl AccountItem {
    fn new(name: &str, visible: bool, view_rule: &str, modify_rule: &str) -> Self {
        Self {
            name: name.to_string(),
            visible,
            view_rule: view_rule.to_string(),
            modify_rule: modify_rule.to_string(),
        }
    }
}

/// Organization entity, keyed by (owner, name).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Organization {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub display_name: String,
    pub website_url: String,
    pub favicon: String,
    pub password_type: String,
    pub password_options: Json<Vec<String>>,
    pub country_codes: Json<Vec<String>>,
    pub default_avatar: String,
    pub tags: Json<Vec<String>>,
    pub languages: Json<Vec<String>>,
    pub init_score: i32,
    pub account_items: Json<Vec<AccountItem>>,
    pub enable_soft_deletion: bool,
    pub is_profile_public: bool,
}

impl Organization {
    /// Build the built-in organization (`admin/built-in`) from seed values.
    pub fn built_in(seed: &OrganizationSeed) -> Self {
        Self {
            owner: ADMIN_OWNER.to_string(),
            name: BUILT_IN_ORGANIZATION_NAME.to_string(),
            created_utc: Utc::now(),
            display_name: seed.display_name.clone(),
            website_url: seed.website_url.clone(),
            favicon: seed.favicon.clone(),
            password_type: "md5-salt".to_string(),
            password_options: Json(vec!["AtLeast6".to_string()]),
            country_codes: Json(
                ["VN", "ID", "SG", "CN"].iter().map(|s| s.to_string()).collect(),
            ),
            default_avatar: seed.favicon.clone(),
            tags: Json(Vec::new()),
            languages: Json(["vi", "id", "en"].iter().map(|s| s.to_string()).collect()),
            init_score: 2000,
            account_items: Json(built_in_account_items()),
            enable_soft_deletion: false,
            is_profile_public: false,
        }
    }
}

/// The account-field table seeded for the built-in organization.
pub fn built_in_account_items() -> Vec<AccountItem> {
    vec![
        AccountItem::new("Organization", true, "Public", "Admin"),
        AccountItem::new("ID", true, "Public", "Immutable"),
        AccountItem::new("Name", true, "Public", "Admin"),
        AccountItem::new("Display name", true, "Public", "Self"),
        AccountItem::new("Avatar", true, "Public", "Self"),
        AccountItem::new("User type", true, "Public", "Admin"),
        AccountItem::new("Password", true, "Self", "Self"),
        AccountItem::new("Email", true, "Public", "Self"),
        AccountItem::new("Phone", true, "Public", "Self"),
        AccountItem::new("Country code", true, "Public", "Admin"),
        AccountItem::new("Country/Region", true, "Public", "Self"),
        AccountItem::new("Location", true, "Public", "Self"),
        AccountItem::new("Affiliation", true, "Public", "Self"),
        AccountItem::new("Title", true, "Public", "Self"),
        AccountItem::new("Homepage", true, "Public", "Self"),
        AccountItem::new("Bio", true, "Public", "Self"),
        AccountItem::new("Tag", true, "Public", "Admin"),
        AccountItem::new("Signup application", true, "Public", "Admin"),
        AccountItem::new("Roles", true, "Public", "Immutable"),
        AccountItem::new("Permissions", true, "Public", "Immutable"),
        AccountItem::new("Groups", true, "Public", "Admin"),
        AccountItem::new("3rd-party logins", true, "Self", "Self"),
        AccountItem::new("Properties", false, "Admin", "Admin"),
        AccountItem::new("Is admin", true, "Admin", "Admin"),
        AccountItem::new("Is forbidden", true, "Admin", "Admin"),
        AccountItem::new("Is deleted", true, "Admin", "Admin"),
        AccountItem::new("Multi-factor authentication", true, "Self", "Self"),
        AccountItem::new("WebAuthn credentials", true, "Self", "Self"),
        AccountItem::new("Managed accounts", true, "Self", "Self"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> OrganizationSeed {
        OrganizationSeed {
            display_name: "Example Org".to_string(),
            website_url: "https://example.com".to_string(),
            favicon: "https://example.com/favicon.png".to_string(),
        }
    }

    #[test]
    fn built_in_organization_uses_reserved_key() {
        let org = Organization::built_in(&seed());
        assert_eq!(org.owner, "admin");
        assert_eq!(org.name, "built-in");
    }

    #[test]
    fn built_in_organization_defaults() {
        let org = Organization::built_in(&seed());
        assert_eq!(org.password_type, "md5-salt");
        assert_eq!(org.password_options.0, vec!["AtLeast6"]);
        assert_eq!(org.country_codes.0, vec!["VN", "ID", "SG", "CN"]);
        assert_eq!(org.languages.0, vec!["vi", "id", "en"]);
        assert_eq!(org.init_score, 2000);
        assert_eq!(org.default_avatar, org.favicon);
        assert!(!org.enable_soft_deletion);
        assert!(!org.is_profile_public);
    }

    #[test]
    fn account_item_table_is_complete() {
        let items = built_in_account_items();
        assert_eq!(items.len(), 29);
        let properties = items.iter().find(|i| i.name == "Properties").unwrap();
        assert!(!properties.visible);
        assert_eq!(properties.view_rule, "Admin");
    }
}
