use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

/// Business-level rejection reasons. Every variant carries a message fit
/// for the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// A write the store refused, e.g. deleting a row that is still referenced.
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn not_found_id(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}

/// Model validators and lookups. Database failures here are reads, so they
/// surface as `Db`; writes go through [`model_write_err`] instead.
impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Db(e) => db_err(e),
        }
    }
}

/// Map a failed write, turning constraint violations into caller-facing
/// rejections instead of opaque database errors.
pub(crate) fn map_write_err(e: DbErr, what: &str) -> ServiceError {
    match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(format!("{what} already exists")),
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
            ServiceError::OperationFailed(format!("{what} is still referenced by other records"))
        }
        _ => match e {
            // the store is unavailable, not the request
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => db_err(e),
            other => ServiceError::OperationFailed(other.to_string()),
        },
    }
}

/// Same as [`map_write_err`] for the `models::*::create` helpers.
pub(crate) fn model_write_err(e: ModelError, what: &str) -> ServiceError {
    match e {
        ModelError::Validation(m) => ServiceError::Validation(m),
        ModelError::Db(e) => map_write_err(e, what),
    }
}

pub(crate) fn db_err(e: DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn messages_are_readable() {
        assert_eq!(ServiceError::not_found_id("barber", 7).to_string(), "not found: barber 7 not found");
        assert_eq!(ServiceError::required("date").to_string(), "validation error: date is required");
    }

    #[test]
    fn generic_write_error_is_operation_failed() {
        let e = map_write_err(DbErr::Custom("boom".into()), "payment");
        assert!(matches!(e, ServiceError::OperationFailed(_)));
    }

    #[test]
    fn lost_connection_on_write_is_a_db_error() {
        let e = map_write_err(DbErr::Conn(RuntimeErr::Internal("Connection refused".into())), "client");
        assert!(matches!(e, ServiceError::Db(_)));
        let e = model_write_err(ModelError::Db(DbErr::Conn(RuntimeErr::Internal("Connection refused".into()))), "client");
        assert!(matches!(e, ServiceError::Db(_)));
    }

    #[test]
    fn model_validation_keeps_bare_message() {
        match ServiceError::from(ModelError::Validation("name is required".into())) {
            ServiceError::Validation(m) => assert_eq!(m, "name is required"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn model_read_failure_is_a_db_error() {
        let e = ServiceError::from(ModelError::Db(DbErr::Conn(RuntimeErr::Internal("Connection refused".into()))));
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
