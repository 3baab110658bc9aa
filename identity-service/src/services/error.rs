use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} {owner}/{name} already exists")]
    DuplicateKey {
        entity: &'static str,
        owner: String,
        name: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            ServiceError::DuplicateKey { .. } => AppError::Conflict(anyhow::anyhow!("{}", err)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
