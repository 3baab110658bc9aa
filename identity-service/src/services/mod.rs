//! Services layer for the identity seeding service.

mod database;
pub mod error;
mod seed;
mod store;

pub use database::Database;
pub use error::ServiceError;
pub use seed::{
    SeedReport, SeedService, SeededRecord, API_MODEL_TEXT, USER_MODEL_TEXT,
};
pub use store::{MemoryStore, SeedStore};
