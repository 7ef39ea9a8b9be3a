use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Kept as the original `DbErr` so callers can still tell constraint
    /// violations from connection failures.
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}
