use thiserror::Error;

/// Failures raised by the SQL backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Any failure reported by the driver or the pool.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The url scheme names no known backend.
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Outcomes of the item service other than success.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The update or delete target does not exist. An expected outcome.
    #[error("Todo not found")]
    NotFound,

    /// Storage failed. Surfaces as an internal error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
