use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Ack;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Rejection sent to the caller as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::OperationFailed(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match e {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m)
            | ServiceError::OperationFailed(m) => m,
            ServiceError::Db(m) => format!("database error: {m}"),
        };
        Self { status, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, reason = %self.message, "request rejected");
        }
        (self.status, Json(Ack::rejected(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::OperationFailed("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (e, status) in cases {
            assert_eq!(ApiError::from(e).status, status);
        }
    }

    #[test]
    fn model_failures_keep_their_class() {
        let down = ModelError::Db(DbErr::Conn(RuntimeErr::Internal("Connection refused".into())));
        let e = ApiError::from(ServiceError::from(down));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);

        let e = ApiError::from(ServiceError::from(ModelError::Validation("name is required".into())));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "name is required");
    }

    #[test]
    fn business_message_is_passed_through_bare() {
        let e = ApiError::from(ServiceError::Conflict("barber 1 already has an appointment".into()));
        assert_eq!(e.message, "barber 1 already has an appointment");
    }
}
