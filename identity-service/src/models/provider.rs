//! Provider model - external service integrations (SMS, email, OAuth).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::SmsProviderSeed;

use super::ADMIN_OWNER;

/// Provider entity, keyed by (owner, name).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Provider {
    pub owner: String,
    pub name: String,
    pub created_utc: DateTime<Utc>,
    pub display_name: String,
    pub category: String,
    pub provider_type: String,
    pub method: String,
    pub client_id: String,
    pub client_secret: String,
    pub template_code: String,
    pub app_id: String,
}

impl Provider {
    /// Build the built-in Twilio SMS provider from seed values.
    pub fn built_in_sms(seed: &SmsProviderSeed) -> Self {
        Self {
            owner: ADMIN_OWNER.to_string(),
            name: seed.name.clone(),
            created_utc: Utc::now(),
            display_name: seed.name.clone(),
            category: seed.name.clone(),
            provider_type: "Twilio SMS".to_string(),
            method: "Normal".to_string(),
            client_id: seed.account_sid.clone(),
            client_secret: seed.auth_token.clone(),
            template_code: seed.template_code.clone(),
            app_id: seed.message_service_sid.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_sms_provider_maps_credentials() {
        let seed = SmsProviderSeed {
            name: "provider_sms_twilio".to_string(),
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            template_code: "Your code is %s".to_string(),
            message_service_sid: "MG456".to_string(),
        };
        let provider = Provider::built_in_sms(&seed);
        assert_eq!(provider.owner, "admin");
        assert_eq!(provider.name, "provider_sms_twilio");
        assert_eq!(provider.provider_type, "Twilio SMS");
        assert_eq!(provider.method, "Normal");
        assert_eq!(provider.client_id, "AC123");
        assert_eq!(provider.client_secret, "token");
        assert_eq!(provider.app_id, "MG456");
    }
}
