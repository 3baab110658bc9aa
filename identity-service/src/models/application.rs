//! Application model - a client application registered with an organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::config::SeedConfig;

use super::{ADMIN_OWNER, BUILT_IN_APPLICATION_NAME, BUILT_IN_ORGANIZATION_NAME};

/// A login provider attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderItem {
    pub name: String,
    pub can_sign_up: bool,
    pub can_sign_in: bool,
    pub can_unlink: bool,
    pub prompted: bool,
    pub signup_group: String,
    pub rule: String,
}

/// One field of an application's signup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupItem {
    pub name: String,
    pub visible: bool,
    pub required: bool,
    pub prompted: bool,
    pub rule: String,
}

impl SignupItem {
    fn new(name: &str, visible: bool, required: bool, prompted: bool, rule: &str) -> Self {
        Self {
            name: name.to_string(),
            visible,
            required,
            prompted,
            rule: rule.to_string(),
        }
    }
}

/// Application entity, keyed by (owner, name).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Application {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub display_name: String,
    pub logo: String,
    pub organization: String,
    pub cert: String,
    pub enable_password: bool,
    pub enable_code_signin: bool,
    pub providers: Json<Vec<ProviderItem>>,
    pub signup_items: Json<Vec<SignupItem>>,
    pub tags: Json<Vec<String>>,
    pub redirect_uris: Json<Vec<String>>,
    pub expire_in_hours: i32,
    pub form_offset: i32,
}

impl Application {
    /// Build the built-in application (`admin/app-built-in`) from seed values.
    ///
    /// The application points at the built-in organization, the configured
    /// signing certificate, and the configured SMS provider for code sign-in.
    pub fn built_in(seed: &SeedConfig) -> Self {
        Self {
            owner: ADMIN_OWNER.to_string(),
            name: BUILT_IN_APPLICATION_NAME.to_string(),
            created_utc: Utc::now(),
            display_name: seed.application.display_name.clone(),
            logo: seed.organization.favicon.clone(),
            organization: BUILT_IN_ORGANIZATION_NAME.to_string(),
            cert: seed.cert.name.clone(),
            enable_password: true,
            enable_code_signin: true,
            providers: Json(vec![ProviderItem {
                name: seed.sms.name.clone(),
                can_sign_up: true,
                can_sign_in: true,
                can_unlink: true,
                prompted: false,
                signup_group: String::new(),
                rule: "None".to_string(),
            }]),
            signup_items: Json(vec![
                SignupItem::new("ID", false, true, false, "Random"),
                SignupItem::new("Phone", true, true, false, "Normal"),
                SignupItem::new("Agreement", true, true, false, "None"),
            ]),
            tags: Json(Vec::new()),
            redirect_uris: Json(Vec::new()),
            expire_in_hours: 168,
            form_offset: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;

    #[test]
    fn built_in_application_wiring() {
        let seed = SeedConfig::for_tests();
        let app = Application::built_in(&seed);
        assert_eq!(app.owner, "admin");
        assert_eq!(app.name, "app-built-in");
        assert_eq!(app.organization, "built-in");
        assert_eq!(app.cert, seed.cert.name);
        assert!(app.enable_password);
        assert!(app.enable_code_signin);
        assert_eq!(app.expire_in_hours, 168);
    }

    #[test]
    fn built_in_application_signup_form() {
        let app = Application::built_in(&SeedConfig::for_tests());
        let items = &app.signup_items.0;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "ID");
        assert!(!items[0].visible);
        assert_eq!(items[0].rule, "Random");
        assert_eq!(items[1].name, "Phone");
        assert_eq!(items[2].name, "Agreement");
    }

    #[test]
    fn built_in_application_sms_provider_item() {
        let seed = SeedConfig::for_tests();
        let app = Application::built_in(&seed);
        let providers = &app.providers.0;
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, seed.sms.name);
        assert!(providers[0].can_sign_in);
        assert_eq!(providers[0].rule, "None");
    }
}
