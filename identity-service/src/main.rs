use identity_service::{
    config::IdentityConfig,
    db,
    services::{Database, SeedService},
};
use service_core::error::AppError;
use service_core::observability::logging::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = IdentityConfig::from_env()?;

    init_tracing(&config.service_name, &config.common.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting identity seeding service"
    );

    let pool = db::create_pool(&config.database)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::Error::new(e)))?;

    db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::Error::new(e)))?;

    let database = Database::new(pool);
    database.health_check().await?;
    tracing::info!("Database initialized successfully");

    let seeder = SeedService::new(Arc::new(database), config.seed.clone());
    let report = seeder.run().await?;

    if report.is_empty() {
        tracing::info!("All built-in records already present");
    } else {
        tracing::info!(created = report.created.len(), "Seeded built-in records");
    }

    Ok(())
}
