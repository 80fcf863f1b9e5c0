use diesel::r2d2::PoolError;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures raised by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
