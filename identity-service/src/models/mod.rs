pub mod application;
pub mod cert;
pub mod organization;
pub mod policy_adapter;
pub mod policy_enforcer;
pub mod policy_model;
pub mod provider;
pub mod user;

pub use application::{Application, ProviderItem, SignupItem};
pub use cert::Cert;
pub use organization::{AccountItem, Organization};
pub use policy_adapter::PolicyAdapter;
pub use policy_enforcer::PolicyEnforcer;
pub use policy_model::PolicyModel;
pub use provider::Provider;
pub use user::User;

/// Reserved owner for records managed by the platform administrator.
pub const ADMIN_OWNER: &str = "admin";

/// Reserved owner for records scoped under the built-in organization.
pub const BUILT_IN_OWNER: &str = "built-in";

/// Name of the built-in organization (owned by `admin`).
pub const BUILT_IN_ORGANIZATION_NAME: &str = "built-in";

/// Name of the built-in admin user (owned by `built-in`).
pub const ADMIN_USER_NAME: &str = "admin";

/// Name of the built-in application (owned by `admin`).
pub const BUILT_IN_APPLICATION_NAME: &str = "app-built-in";
