use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;
use std::env;

/// Configuration for the identity seeding service.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Values the seeder copies into built-in records.
///
/// These are deliberately permissive: whatever the environment supplies is
/// stored as-is, empty strings included. The original system behaved this
/// way; the seeder flags the risky cases at runtime instead of rejecting
/// them.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub organization: OrganizationSeed,
    pub admin: AdminSeed,
    pub application: ApplicationSeed,
    pub cert: CertSeed,
    pub sms: SmsProviderSeed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationSeed {
    pub display_name: String,
    pub website_url: String,
    pub favicon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub password: String,
    pub email: String,
    pub phone: String,
    pub created_ip: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSeed {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertSeed {
    pub name: String,
    pub display_name: String,
    pub certificate: String,
    pub private_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmsProviderSeed {
    pub name: String,
    pub account_sid: String,
    pub auth_token: String,
    pub template_code: String,
    pub message_service_sid: String,
}

impl IdentityConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let config = IdentityConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("identity-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            database: DatabaseConfig {
                url: get_env(
                    "DATABASE_URL",
                    Some("postgres://localhost/identity"),
                    is_prod,
                )?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"), is_prod)?
                    .parse()
                    .unwrap_or(5),
                min_connections: get_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?
                    .parse()
                    .unwrap_or(1),
            },
            seed: SeedConfig::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.database.max_connections == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DATABASE_MAX_CONNECTIONS must be greater than 0"
            )));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS"
            )));
        }

        Ok(())
    }
}

impl SeedConfig {
    /// Read every seed value from the environment, defaulting to empty.
    ///
    /// Unlike service configuration, seed values never fail the startup:
    /// missing keys become empty strings and flow into the records verbatim.
    pub fn from_env() -> Self {
        Self {
            organization: OrganizationSeed {
                display_name: seed_env("ORGANIZATION_DISPLAY_NAME"),
                website_url: seed_env("ORGANIZATION_URL"),
                favicon: seed_env("ORGANIZATION_IMAGE"),
            },
            admin: AdminSeed {
                password: seed_env("ADMIN_PASSWORD"),
                email: seed_env("ADMIN_EMAIL"),
                phone: seed_env("ADMIN_PHONE"),
                created_ip: seed_env("IP_ADDRESS"),
            },
            application: ApplicationSeed {
                display_name: seed_env("APP_DISPLAY_NAME"),
            },
            cert: CertSeed {
                name: seed_env("CERT_NAME"),
                display_name: seed_env("CERT_DISPLAY_NAME"),
                certificate: seed_env("JWT_CERTIFICATE"),
                private_key: seed_env("JWT_PRIVATE_KEY"),
            },
            sms: SmsProviderSeed {
                name: seed_env("SMS_TWILIO_PROVIDER_NAME"),
                account_sid: seed_env("SMS_TWILIO_ACCOUNT_SID"),
                auth_token: seed_env("SMS_TWILIO_AUTH_TOKEN"),
                template_code: seed_env("SMS_TEMPLATE"),
                message_service_sid: seed_env("SMS_TWILIO_MESSAGE_SERVICE_SID"),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            organization: OrganizationSeed {
                display_name: "Test Org".to_string(),
                website_url: "https://org.test".to_string(),
                favicon: "https://org.test/favicon.png".to_string(),
            },
            admin: AdminSeed {
                password: "test-password".to_string(),
                email: "admin@org.test".to_string(),
                phone: "+6511111111".to_string(),
                created_ip: "127.0.0.1".to_string(),
            },
            application: ApplicationSeed {
                display_name: "Test App".to_string(),
            },
            cert: CertSeed {
                name: "cert-built-in".to_string(),
                display_name: "Built-in Cert".to_string(),
                certificate: "test-cert-pem".to_string(),
                private_key: "test-key-pem".to_string(),
            },
            sms: SmsProviderSeed {
                name: "provider_sms_twilio".to_string(),
                account_sid: "AC_test".to_string(),
                auth_token: "token_test".to_string(),
                template_code: "code: %s".to_string(),
                message_service_sid: "MG_test".to_string(),
            },
        }
    }
}

fn seed_env(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn seed_env_defaults_to_empty() {
        assert_eq!(seed_env("IDENTITY_SEED_TEST_UNSET_KEY"), "");
    }
}
