//! Integration tests for the built-in seeding routine.
//!
//! All tests run against the in-memory store with a fixed seed
//! configuration.

mod common;

use std::sync::Arc;

use common::{seeder, test_seed_config, FailingStore, TEST_CERT_NAME, TEST_SMS_PROVIDER_NAME};
use identity_service::{
    models::{Organization, PolicyModel},
    services::{SeedService, SeedStore, API_MODEL_TEXT, USER_MODEL_TEXT},
};

#[tokio::test]
async fn empty_store_gets_all_built_in_records() {
    let (store, service) = seeder();

    let report = service.run().await.unwrap();

    // 5 account records + 2 models + 2 adapters + 2 enforcers
    assert_eq!(report.created.len(), 11);
    assert_eq!(store.record_count(), 11);

    let org = store
        .find_organization("admin", "built-in")
        .await
        .unwrap()
        .expect("organization should be seeded");
    assert_eq!(org.display_name, "Example Org");

    let user = store
        .find_user("built-in", "admin")
        .await
        .unwrap()
        .expect("admin user should be seeded");
    assert!(user.is_admin);
    assert!(!user.is_forbidden);
    assert_eq!(user.password, "integration-test-password");

    let app = store
        .find_application("admin", "app-built-in")
        .await
        .unwrap()
        .expect("application should be seeded");
    assert_eq!(app.organization, "built-in");
    assert_eq!(app.cert, TEST_CERT_NAME);

    assert!(store
        .find_cert("admin", TEST_CERT_NAME)
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_provider("admin", TEST_SMS_PROVIDER_NAME)
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_model("built-in", "api-model-built-in")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_model("built-in", "user-model-built-in")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_adapter("built-in", "api-adapter-built-in")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_adapter("built-in", "user-adapter-built-in")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_enforcer("built-in", "api-enforcer-built-in")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_policy_enforcer("built-in", "user-enforcer-built-in")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn seeding_twice_changes_nothing() {
    let (store, service) = seeder();

    let first = service.run().await.unwrap();
    assert_eq!(first.created.len(), 11);
    let count_after_first = store.record_count();

    let second = service.run().await.unwrap();
    assert!(second.is_empty());
    assert_eq!(store.record_count(), count_after_first);
}

#[tokio::test]
async fn existing_organization_gates_its_dependents() {
    let (store, service) = seeder();

    // Pre-existing organization from an earlier bootstrap.
    let org = Organization::built_in(&test_seed_config().organization);
    store.insert_organization(&org).await.unwrap();

    let report = service.run().await.unwrap();

    // None of the organization's dependents are seeded...
    assert!(store.find_user("built-in", "admin").await.unwrap().is_none());
    assert!(store
        .find_application("admin", "app-built-in")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_cert("admin", TEST_CERT_NAME)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_provider("admin", TEST_SMS_PROVIDER_NAME)
        .await
        .unwrap()
        .is_none());

    // ...but the policy family is still checked and created.
    assert_eq!(report.created.len(), 6);
    assert!(report.contains("policy model", "built-in", "api-model-built-in"));
    assert!(report.contains("policy model", "built-in", "user-model-built-in"));
    assert!(report.contains("policy enforcer", "built-in", "api-enforcer-built-in"));
    assert!(report.contains("policy enforcer", "built-in", "user-enforcer-built-in"));
}

#[tokio::test]
async fn existing_api_model_gates_the_policy_family() {
    let (store, service) = seeder();

    let model = PolicyModel::built_in("api-model-built-in", "API Model", API_MODEL_TEXT);
    store.insert_policy_model(&model).await.unwrap();

    let report = service.run().await.unwrap();

    // Account records are seeded as usual.
    assert_eq!(report.created.len(), 5);
    assert!(report.contains("organization", "admin", "built-in"));

    // The entire policy branch is short-circuited, the user model included.
    assert!(store
        .find_policy_model("built-in", "user-model-built-in")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_policy_adapter("built-in", "api-adapter-built-in")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_policy_enforcer("built-in", "api-enforcer-built-in")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn enforcer_references_resolve_to_seeded_records() {
    let (store, service) = seeder();
    service.run().await.unwrap();

    for enforcer_name in ["api-enforcer-built-in", "user-enforcer-built-in"] {
        let enforcer = store
            .find_policy_enforcer("built-in", enforcer_name)
            .await
            .unwrap()
            .expect("enforcer should be seeded");

        let (model_owner, model_name) = enforcer
            .model
            .split_once('/')
            .expect("model reference should be owner/name");
        assert!(store
            .find_policy_model(model_owner, model_name)
            .await
            .unwrap()
            .is_some());

        let (adapter_owner, adapter_name) = enforcer
            .adapter
            .split_once('/')
            .expect("adapter reference should be owner/name");
        assert!(store
            .find_policy_adapter(adapter_owner, adapter_name)
            .await
            .unwrap()
            .is_some());
    }
}

#[tokio::test]
async fn seeded_model_texts_are_exact() {
    let (store, service) = seeder();
    service.run().await.unwrap();

    let api = store
        .find_policy_model("built-in", "api-model-built-in")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(api.model_text, API_MODEL_TEXT);
    assert_eq!(api.display_name, "API Model");

    let user = store
        .find_policy_model("built-in", "user-model-built-in")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.model_text, USER_MODEL_TEXT);
    assert_eq!(user.display_name, "Built-in Model");
}

#[tokio::test]
async fn adapters_bind_the_expected_rule_tables() {
    let (store, service) = seeder();
    service.run().await.unwrap();

    let api = store
        .find_policy_adapter("built-in", "api-adapter-built-in")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(api.rule_table, "casbin_api_rule");
    assert!(api.use_same_db);

    let user = store
        .find_policy_adapter("built-in", "user-adapter-built-in")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.rule_table, "casbin_user_rule");
    assert!(user.use_same_db);
}

#[tokio::test]
async fn store_failure_aborts_the_run() {
    let service = SeedService::new(Arc::new(FailingStore), test_seed_config());

    let result = service.run().await;
    assert!(result.is_err());
}
