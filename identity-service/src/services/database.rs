//! PostgreSQL database service for the identity platform.
//!
//! Implements the [`SeedStore`] port with sqlx queries against the tables
//! created by the crate's migrations.

use sqlx::postgres::PgPool;

use async_trait::async_trait;

use crate::models::{
    Application, Cert, Organization, PolicyAdapter, PolicyEnforcer, PolicyModel, Provider, User,
};
use crate::services::{SeedStore, ServiceError};

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(|e| {
            tracing::error!("Database health check failed: {}", e);
            ServiceError::Database(e)
        })?;
        Ok(())
    }
}

#[async_trait]
impl SeedStore for Database {
    async fn find_organization(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Organization>, ServiceError> {
        let org = sqlx::query_as::<_, Organization>(
            "SELECT * FROM organizations WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(org)
    }

    async fn insert_organization(&self, org: &Organization) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO organizations (owner, name, created_utc, display_name, website_url, favicon,
                password_type, password_options, country_codes, default_avatar, tags, languages,
                init_score, account_items, enable_soft_deletion, is_profile_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(&org.owner)
        .bind(&org.name)
        .bind(org.created_utc)
        .bind(&org.display_name)
        .bind(&org.website_url)
        .bind(&org.favicon)
        .bind(&org.password_type)
        .bind(&org.password_options)
        .bind(&org.country_codes)
        .bind(&org.default_avatar)
        .bind(&org.tags)
        .bind(&org.languages)
        .bind(org.init_score)
        .bind(&org.account_items)
        .bind(org.enable_soft_deletion)
        .bind(org.is_profile_public)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user(&self, owner: &str, name: &str) -> Result<Option<User>, ServiceError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE owner = $1 AND name = $2")
                .bind(owner)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO users (owner, name, created_utc, id, user_type, password, display_name,
                email, phone, country_code, address, tag, score, ranking, is_admin, is_forbidden,
                is_deleted, signup_application, created_ip, properties)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20)
            "#,
        )
        .bind(&user.owner)
        .bind(&user.name)
        .bind(user.created_utc)
        .bind(user.id)
        .bind(&user.user_type)
        .bind(&user.password)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.country_code)
        .bind(&user.address)
        .bind(&user.tag)
        .bind(user.score)
        .bind(user.ranking)
        .bind(user.is_admin)
        .bind(user.is_forbidden)
        .bind(user.is_deleted)
        .bind(&user.signup_application)
        .bind(&user.created_ip)
        .bind(&user.properties)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_application(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Application>, ServiceError> {
        let app = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(app)
    }

    async fn insert_application(&self, app: &Application) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO applications (owner, name, created_utc, display_name, logo, organization,
                cert, enable_password, enable_code_signin, providers, signup_items, tags,
                redirect_uris, expire_in_hours, form_offset)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(&app.owner)
        .bind(&app.name)
        .bind(app.created_utc)
        .bind(&app.display_name)
        .bind(&app.logo)
        .bind(&app.organization)
        .bind(&app.cert)
        .bind(app.enable_password)
        .bind(app.enable_code_signin)
        .bind(&app.providers)
        .bind(&app.signup_items)
        .bind(&app.tags)
        .bind(&app.redirect_uris)
        .bind(app.expire_in_hours)
        .bind(app.form_offset)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_cert(&self, owner: &str, name: &str) -> Result<Option<Cert>, ServiceError> {
        let cert =
            sqlx::query_as::<_, Cert>("SELECT * FROM certs WHERE owner = $1 AND name = $2")
                .bind(owner)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(cert)
    }

    async fn insert_cert(&self, cert: &Cert) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO certs (owner, name, created_utc, display_name, scope, cert_type,
                crypto_algorithm, bit_size, expire_in_years, certificate, private_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&cert.owner)
        .bind(&cert.name)
        .bind(cert.created_utc)
        .bind(&cert.display_name)
        .bind(&cert.scope)
        .bind(&cert.cert_type)
        .bind(&cert.crypto_algorithm)
        .bind(cert.bit_size)
        .bind(cert.expire_in_years)
        .bind(&cert.certificate)
        .bind(&cert.private_key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_provider(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Provider>, ServiceError> {
        let provider = sqlx::query_as::<_, Provider>(
            "SELECT * FROM providers WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(provider)
    }

    async fn insert_provider(&self, provider: &Provider) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO providers (owner, name, created_utc, display_name, category,
                provider_type, method, client_id, client_secret, template_code, app_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&provider.owner)
        .bind(&provider.name)
        .bind(provider.created_utc)
        .bind(&provider.display_name)
        .bind(&provider.category)
        .bind(&provider.provider_type)
        .bind(&provider.method)
        .bind(&provider.client_id)
        .bind(&provider.client_secret)
        .bind(&provider.template_code)
        .bind(&provider.app_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_policy_model(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyModel>, ServiceError> {
        let model = sqlx::query_as::<_, PolicyModel>(
            "SELECT * FROM policy_models WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(model)
    }

    async fn insert_policy_model(&self, model: &PolicyModel) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO policy_models (owner, name, created_utc, display_name, model_text)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&model.owner)
        .bind(&model.name)
        .bind(model.created_utc)
        .bind(&model.display_name)
        .bind(&model.model_text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_policy_adapter(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyAdapter>, ServiceError> {
        let adapter = sqlx::query_as::<_, PolicyAdapter>(
            "SELECT * FROM policy_adapters WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(adapter)
    }

    async fn insert_policy_adapter(&self, adapter: &PolicyAdapter) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO policy_adapters (owner, name, created_utc, rule_table, use_same_db)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&adapter.owner)
        .bind(&adapter.name)
        .bind(adapter.created_utc)
        .bind(&adapter.rule_table)
        .bind(adapter.use_same_db)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_policy_enforcer(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyEnforcer>, ServiceError> {
        let enforcer = sqlx::query_as::<_, PolicyEnforcer>(
            "SELECT * FROM policy_enforcers WHERE owner = $1 AND name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enforcer)
    }

    async fn insert_policy_enforcer(
        &self,
        enforcer: &PolicyEnforcer,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO policy_enforcers (owner, name, created_utc, display_name, model, adapter)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&enforcer.owner)
        .bind(&enforcer.name)
        .bind(enforcer.created_utc)
        .bind(&enforcer.display_name)
        .bind(&enforcer.model)
        .bind(&enforcer.adapter)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
