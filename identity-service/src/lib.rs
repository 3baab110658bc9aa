//! Identity platform seeding service.
//!
//! Ensures the platform's built-in records exist before anything serves
//! traffic: the built-in organization and its admin user, application,
//! signing certificate, and SMS provider, plus the authorization policy
//! records (models, adapters, enforcers). Seeding is idempotent; every
//! record is created at most once, keyed by (owner, name).

pub mod config;
pub mod db;
pub mod models;
pub mod services;
