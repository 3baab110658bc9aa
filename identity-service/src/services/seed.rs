//! Idempotent seeding of built-in records.
//!
//! Runs once at process startup, before anything serves traffic. Every step
//! is check-then-insert against the storage port: look the record up by its
//! (owner, name) key, skip it when present, create it from seed
//! configuration otherwise. Any storage error aborts the run.

use std::sync::Arc;

use crate::config::SeedConfig;
use crate::models::{
    Application, Cert, Organization, PolicyAdapter, PolicyEnforcer, PolicyModel, Provider, User,
    ADMIN_OWNER, ADMIN_USER_NAME, BUILT_IN_APPLICATION_NAME, BUILT_IN_ORGANIZATION_NAME,
    BUILT_IN_OWNER,
};
use crate::services::{SeedStore, ServiceError};

pub const API_MODEL_NAME: &str = "api-model-built-in";
pub const USER_MODEL_NAME: &str = "user-model-built-in";
pub const API_ADAPTER_NAME: &str = "api-adapter-built-in";
pub const USER_ADAPTER_NAME: &str = "user-adapter-built-in";
pub const API_ENFORCER_NAME: &str = "api-enforcer-built-in";
pub const USER_ENFORCER_NAME: &str = "user-enforcer-built-in";

/// Grammar for the API authorization model. The downstream policy evaluator
/// parses this text; it must not be reformatted.
pub const API_MODEL_TEXT: &str = r#"[request_definition]
r = subOwner, subName, method, urlPath, objOwner, objName

[policy_definition]
p = subOwner, subName, method, urlPath, objOwner, objName

[role_definition]
g = _, _

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = (r.subOwner == p.subOwner || p.subOwner == "*") && \
    (r.subName == p.subName || p.subName == "*" || r.subName != "anonymous" && p.subName == "!anonymous") && \
    (r.method == p.method || p.method == "*") && \
    (r.urlPath == p.urlPath || p.urlPath == "*") && \
    (r.objOwner == p.objOwner || p.objOwner == "*") && \
    (r.objName == p.objName || p.objName == "*") || \
    (r.subOwner == r.objOwner && r.subName == r.objName)"#;

/// Grammar for the user authorization model. Same exactness rule as
/// [`API_MODEL_TEXT`].
pub const USER_MODEL_TEXT: &str = r#"[request_definition]
r = sub, obj, act

[policy_definition]
p = sub, obj, act

[role_definition]
g = _, _

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = g(r.sub, p.sub) && r.obj == p.obj && r.act == p.act"#;

/// One record created by a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRecord {
    pub entity: &'static str,
    pub owner: String,
    pub name: String,
}

/// What a seeding run created. Records that already existed are not listed.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub created: Vec<SeededRecord>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    pub fn contains(&self, entity: &str, owner: &str, name: &str) -> bool {
        self.created
            .iter()
            .any(|r| r.entity == entity && r.owner == owner && r.name == name)
    }

    fn record(&mut self, entity: &'static str, owner: &str, name: &str) {
        tracing::info!(entity, owner, name, "Created built-in record");
        self.created.push(SeededRecord {
            entity,
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }
}

/// The seeding routine, bound to a storage port and seed configuration.
#[derive(Clone)]
pub struct SeedService {
    store: Arc<dyn SeedStore>,
    seed: SeedConfig,
}

impl SeedService {
    pub fn new(store: Arc<dyn SeedStore>, seed: SeedConfig) -> Self {
        Self { store, seed }
    }

    /// Run the full bootstrap sequence.
    ///
    /// The organization gates its dependents: provider, admin user,
    /// application, and cert are only seeded in the run that creates the
    /// organization. The API model gates the policy records the same way.
    /// A parent that already exists short-circuits its whole branch, so
    /// dependents are never repaired individually once the first bootstrap
    /// has happened.
    pub async fn run(&self) -> Result<SeedReport, ServiceError> {
        let mut report = SeedReport::default();

        let existed = self.ensure_organization(&mut report).await?;
        if !existed {
            self.ensure_sms_provider(&mut report).await?;
            self.ensure_admin_user(&mut report).await?;
            self.ensure_application(&mut report).await?;
            self.ensure_cert(&mut report).await?;
        }

        let existed = self.ensure_api_model(&mut report).await?;
        if !existed {
            self.ensure_api_adapter(&mut report).await?;
            self.ensure_api_enforcer(&mut report).await?;
            self.ensure_user_model(&mut report).await?;
            self.ensure_user_adapter(&mut report).await?;
            self.ensure_user_enforcer(&mut report).await?;
        }

        Ok(report)
    }

    /// Returns whether the built-in organization already existed.
    async fn ensure_organization(&self, report: &mut SeedReport) -> Result<bool, ServiceError> {
        if self
            .store
            .find_organization(ADMIN_OWNER, BUILT_IN_ORGANIZATION_NAME)
            .await?
            .is_some()
        {
            tracing::info!(
                owner = ADMIN_OWNER,
                name = BUILT_IN_ORGANIZATION_NAME,
                "Built-in organization already exists"
            );
            return Ok(true);
        }

        let organization = Organization::built_in(&self.seed.organization);
        self.store.insert_organization(&organization).await?;
        report.record("organization", &organization.owner, &organization.name);
        Ok(false)
    }

    async fn ensure_sms_provider(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_provider(ADMIN_OWNER, &self.seed.sms.name)
            .await?
            .is_some()
        {
            tracing::info!(name = %self.seed.sms.name, "Built-in SMS provider already exists");
            return Ok(());
        }

        let provider = Provider::built_in_sms(&self.seed.sms);
        self.store.insert_provider(&provider).await?;
        report.record("provider", &provider.owner, &provider.name);
        Ok(())
    }

    async fn ensure_admin_user(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_user(BUILT_IN_OWNER, ADMIN_USER_NAME)
            .await?
            .is_some()
        {
            tracing::info!(
                owner = BUILT_IN_OWNER,
                name = ADMIN_USER_NAME,
                "Built-in admin user already exists"
            );
            return Ok(());
        }

        // Seed values are stored unvalidated; an empty password is accepted
        // but worth surfacing.
        if self.seed.admin.password.is_empty() {
            tracing::warn!("ADMIN_PASSWORD is empty; seeding the built-in admin without one");
        }

        let user = User::built_in_admin(&self.seed.admin);
        self.store.insert_user(&user).await?;
        report.record("user", &user.owner, &user.name);
        Ok(())
    }

    async fn ensure_application(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_application(ADMIN_OWNER, BUILT_IN_APPLICATION_NAME)
            .await?
            .is_some()
        {
            tracing::info!(
                owner = ADMIN_OWNER,
                name = BUILT_IN_APPLICATION_NAME,
                "Built-in application already exists"
            );
            return Ok(());
        }

        let application = Application::built_in(&self.seed);
        self.store.insert_application(&application).await?;
        report.record("application", &application.owner, &application.name);
        Ok(())
    }

    async fn ensure_cert(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_cert(ADMIN_OWNER, &self.seed.cert.name)
            .await?
            .is_some()
        {
            tracing::info!(name = %self.seed.cert.name, "Built-in cert already exists");
            return Ok(());
        }

        let cert = Cert::built_in(&self.seed.cert);
        self.store.insert_cert(&cert).await?;
        report.record("cert", &cert.owner, &cert.name);
        Ok(())
    }

    /// Returns whether the API model already existed.
    async fn ensure_api_model(&self, report: &mut SeedReport) -> Result<bool, ServiceError> {
        if self
            .store
            .find_policy_model(BUILT_IN_OWNER, API_MODEL_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = API_MODEL_NAME, "API authorization model already exists");
            return Ok(true);
        }

        let model = PolicyModel::built_in(API_MODEL_NAME, "API Model", API_MODEL_TEXT);
        self.store.insert_policy_model(&model).await?;
        report.record("policy model", &model.owner, &model.name);
        Ok(false)
    }

    async fn ensure_user_model(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_policy_model(BUILT_IN_OWNER, USER_MODEL_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = USER_MODEL_NAME, "User authorization model already exists");
            return Ok(());
        }

        let model = PolicyModel::built_in(USER_MODEL_NAME, "Built-in Model", USER_MODEL_TEXT);
        self.store.insert_policy_model(&model).await?;
        report.record("policy model", &model.owner, &model.name);
        Ok(())
    }

    async fn ensure_api_adapter(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_policy_adapter(BUILT_IN_OWNER, API_ADAPTER_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = API_ADAPTER_NAME, "API policy adapter already exists");
            return Ok(());
        }

        let adapter = PolicyAdapter::built_in(API_ADAPTER_NAME, "casbin_api_rule");
        self.store.insert_policy_adapter(&adapter).await?;
        report.record("policy adapter", &adapter.owner, &adapter.name);
        Ok(())
    }

    async fn ensure_user_adapter(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_policy_adapter(BUILT_IN_OWNER, USER_ADAPTER_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = USER_ADAPTER_NAME, "User policy adapter already exists");
            return Ok(());
        }

        let adapter = PolicyAdapter::built_in(USER_ADAPTER_NAME, "casbin_user_rule");
        self.store.insert_policy_adapter(&adapter).await?;
        report.record("policy adapter", &adapter.owner, &adapter.name);
        Ok(())
    }

    async fn ensure_api_enforcer(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_policy_enforcer(BUILT_IN_OWNER, API_ENFORCER_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = API_ENFORCER_NAME, "API enforcer already exists");
            return Ok(());
        }

        let enforcer = PolicyEnforcer::built_in(
            API_ENFORCER_NAME,
            "API Enforcer",
            &format!("{}/{}", BUILT_IN_OWNER, API_MODEL_NAME),
            &format!("{}/{}", BUILT_IN_OWNER, API_ADAPTER_NAME),
        );
        self.store.insert_policy_enforcer(&enforcer).await?;
        report.record("policy enforcer", &enforcer.owner, &enforcer.name);
        Ok(())
    }

    async fn ensure_user_enforcer(&self, report: &mut SeedReport) -> Result<(), ServiceError> {
        if self
            .store
            .find_policy_enforcer(BUILT_IN_OWNER, USER_ENFORCER_NAME)
            .await?
            .is_some()
        {
            tracing::info!(name = USER_ENFORCER_NAME, "User enforcer already exists");
            return Ok(());
        }

        let enforcer = PolicyEnforcer::built_in(
            USER_ENFORCER_NAME,
            "User Enforcer",
            &format!("{}/{}", BUILT_IN_OWNER, USER_MODEL_NAME),
            &format!("{}/{}", BUILT_IN_OWNER, USER_ADAPTER_NAME),
        );
        self.store.insert_policy_enforcer(&enforcer).await?;
        report.record("policy enforcer", &enforcer.owner, &enforcer.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_texts_keep_their_section_layout() {
        for text in [API_MODEL_TEXT, USER_MODEL_TEXT] {
            assert!(text.starts_with("[request_definition]"));
            assert!(text.contains("[policy_definition]"));
            assert!(text.contains("[role_definition]"));
            assert!(text.contains("[policy_effect]"));
            assert!(text.contains("[matchers]"));
        }
        // The API matcher spans continued lines; the continuations are part
        // of the grammar.
        assert!(API_MODEL_TEXT.contains("\\\n    "));
    }

    #[test]
    fn report_lookup() {
        let mut report = SeedReport::default();
        report.record("organization", "admin", "built-in");
        assert!(report.contains("organization", "admin", "built-in"));
        assert!(!report.contains("organization", "admin", "other"));
        assert!(!report.is_empty());
    }
}
