//! Storage port for the seeding routine.
//!
//! `SeedStore` is the only thing the seeder knows about persistence: one
//! find-by-natural-key and one insert per entity type. The production
//! implementation is [`Database`](super::Database); [`MemoryStore`] backs
//! deterministic tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{
    Application, Cert, Organization, PolicyAdapter, PolicyEnforcer, PolicyModel, Provider, User,
};
use crate::services::ServiceError;

/// Persistence port for built-in records, keyed by (owner, name).
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn find_organization(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Organization>, ServiceError>;
    async fn insert_organization(&self, org: &Organization) -> Result<(), ServiceError>;

    async fn find_user(&self, owner: &str, name: &str) -> Result<Option<User>, ServiceError>;
    async fn insert_user(&self, user: &User) -> Result<(), ServiceError>;

    async fn find_application(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Application>, ServiceError>;
    async fn insert_application(&self, app: &Application) -> Result<(), ServiceError>;

    async fn find_cert(&self, owner: &str, name: &str) -> Result<Option<Cert>, ServiceError>;
    async fn insert_cert(&self, cert: &Cert) -> Result<(), ServiceError>;

    async fn find_provider(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Provider>, ServiceError>;
    async fn insert_provider(&self, provider: &Provider) -> Result<(), ServiceError>;

    async fn find_policy_model(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyModel>, ServiceError>;
    async fn insert_policy_model(&self, model: &PolicyModel) -> Result<(), ServiceError>;

    async fn find_policy_adapter(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyAdapter>, ServiceError>;
    async fn insert_policy_adapter(&self, adapter: &PolicyAdapter) -> Result<(), ServiceError>;

    async fn find_policy_enforcer(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyEnforcer>, ServiceError>;
    async fn insert_policy_enforcer(&self, enforcer: &PolicyEnforcer)
        -> Result<(), ServiceError>;
}

type Key = (String, String);

#[derive(Default)]
struct MemoryInner {
    organizations: HashMap<Key, Organization>,
    users: HashMap<Key, User>,
    applications: HashMap<Key, Application>,
    certs: HashMap<Key, Cert>,
    providers: HashMap<Key, Provider>,
    policy_models: HashMap<Key, PolicyModel>,
    policy_adapters: HashMap<Key, PolicyAdapter>,
    policy_enforcers: HashMap<Key, PolicyEnforcer>,
}

/// In-memory [`SeedStore`] with the same key-uniqueness guarantee as the
/// database schema. Used by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across all entity types.
    pub fn record_count(&self) -> usize {
        let inner = self.lock();
        inner.organizations.len()
            + inner.users.len()
            + inner.applications.len()
            + inner.certs.len()
            + inner.providers.len()
            + inner.policy_models.len()
            + inner.policy_adapters.len()
            + inner.policy_enforcers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A panic while holding the guard never leaves the maps half-updated,
        // so a poisoned lock is still safe to reuse.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn key(owner: &str, name: &str) -> Key {
    (owner.to_string(), name.to_string())
}

fn insert_unique<T: Clone>(
    map: &mut HashMap<Key, T>,
    entity: &'static str,
    owner: &str,
    name: &str,
    record: &T,
) -> Result<(), ServiceError> {
    let k = key(owner, name);
    if map.contains_key(&k) {
        return Err(ServiceError::DuplicateKey {
            entity,
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }
    map.insert(k, record.clone());
    Ok(())
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn find_organization(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Organization>, ServiceError> {
        Ok(self.lock().organizations.get(&key(owner, name)).cloned())
    }

    async fn insert_organization(&self, org: &Organization) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().organizations,
            "organization",
            &org.owner,
            &org.name,
            org,
        )
    }

    async fn find_user(&self, owner: &str, name: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.lock().users.get(&key(owner, name)).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), ServiceError> {
        insert_unique(&mut self.lock().users, "user", &user.owner, &user.name, user)
    }

    async fn find_application(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Application>, ServiceError> {
        Ok(self.lock().applications.get(&key(owner, name)).cloned())
    }

    async fn insert_application(&self, app: &Application) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().applications,
            "application",
            &app.owner,
            &app.name,
            app,
        )
    }

    async fn find_cert(&self, owner: &str, name: &str) -> Result<Option<Cert>, ServiceError> {
        Ok(self.lock().certs.get(&key(owner, name)).cloned())
    }

    async fn insert_cert(&self, cert: &Cert) -> Result<(), ServiceError> {
        insert_unique(&mut self.lock().certs, "cert", &cert.owner, &cert.name, cert)
    }

    async fn find_provider(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Provider>, ServiceError> {
        Ok(self.lock().providers.get(&key(owner, name)).cloned())
    }

    async fn insert_provider(&self, provider: &Provider) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().providers,
            "provider",
            &provider.owner,
            &provider.name,
            provider,
        )
    }

    async fn find_policy_model(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyModel>, ServiceError> {
        Ok(self.lock().policy_models.get(&key(owner, name)).cloned())
    }

    async fn insert_policy_model(&self, model: &PolicyModel) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().policy_models,
            "policy model",
            &model.owner,
            &model.name,
            model,
        )
    }

    async fn find_policy_adapter(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyAdapter>, ServiceError> {
        Ok(self.lock().policy_adapters.get(&key(owner, name)).cloned())
    }

    async fn insert_policy_adapter(&self, adapter: &PolicyAdapter) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().policy_adapters,
            "policy adapter",
            &adapter.owner,
            &adapter.name,
            adapter,
        )
    }

    async fn find_policy_enforcer(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<PolicyEnforcer>, ServiceError> {
        Ok(self.lock().policy_enforcers.get(&key(owner, name)).cloned())
    }

    async fn insert_policy_enforcer(
        &self,
        enforcer: &PolicyEnforcer,
    ) -> Result<(), ServiceError> {
        insert_unique(
            &mut self.lock().policy_enforcers,
            "policy enforcer",
            &enforcer.owner,
            &enforcer.name,
            enforcer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;

    #[tokio::test]
    async fn memory_store_round_trips_by_key() {
        let store = MemoryStore::new();
        let org = Organization::built_in(&SeedConfig::for_tests().organization);
        store.insert_organization(&org).await.unwrap();

        let found = store.find_organization("admin", "built-in").await.unwrap();
        assert!(found.is_some());
        assert!(store
            .find_organization("admin", "other")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn memory_store_recovers_from_a_poisoned_lock() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let org = Organization::built_in(&SeedConfig::for_tests().organization);
        store.insert_organization(&org).await.unwrap();

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the guard");
        })
        .join();

        let found = store.find_organization("admin", "built-in").await.unwrap();
        assert!(found.is_some());
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn memory_store_rejects_duplicate_keys() {
        let store = MemoryStore::new();
        let org = Organization::built_in(&SeedConfig::for_tests().organization);
        store.insert_organization(&org).await.unwrap();

        let err = store.insert_organization(&org).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateKey { .. }));
        assert_eq!(store.record_count(), 1);
    }
}
