use agdata_store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Message returned when creating a record whose name is taken.
pub const NAME_EXISTS: &str = "A record with this name already exists.";

/// Outcome of a rejected [`RecordService`](crate::RecordService) operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request is malformed (blank name).
    #[error("{0}")]
    Validation(String),

    /// The name is already in use.
    #[error("{0}")]
    Conflict(String),

    /// The target record does not exist.
    #[error("record not found")]
    NotFound,

    /// The store accepted the request but reported no change.
    #[error("{0}")]
    Failed(&'static str),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::Invalid(e) => Self::Validation(e.to_string()),
            other => Self::Store(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from running the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// An HTTP error response: a status and an optional plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: Option<String>) -> Self {
        Self { status, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Some(message.into()))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) => Self::bad_request(msg),
            ServiceError::NotFound => Self::new(StatusCode::NOT_FOUND, None),
            ServiceError::Failed(_) => Self::new(StatusCode::BAD_REQUEST, None),
            ServiceError::Store(StoreError::ConstraintViolation(msg)) => Self::bad_request(msg),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string()))
            }
            ServiceError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, Some(msg))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.message {
            Some(message) => (self.status, message).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agdata_types::{RecordId, TypeError};

    #[test]
    fn validation_is_bad_request_with_message() {
        let api = ApiError::from(ServiceError::Validation("bad".into()));
        assert_eq!(api, ApiError::bad_request("bad"));
    }

    #[test]
    fn conflict_is_bad_request_with_message() {
        let api = ApiError::from(ServiceError::Conflict(NAME_EXISTS.into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message.as_deref(), Some(NAME_EXISTS));
    }

    #[test]
    fn not_found_has_no_body() {
        let api = ApiError::from(ServiceError::NotFound);
        assert_eq!(api, ApiError::new(StatusCode::NOT_FOUND, None));
    }

    #[test]
    fn failed_mutation_is_bare_bad_request() {
        let api = ApiError::from(ServiceError::Failed("no change"));
        assert_eq!(api, ApiError::new(StatusCode::BAD_REQUEST, None));
    }

    #[test]
    fn constraint_violation_is_bad_request() {
        let err = ServiceError::from(StoreError::ConstraintViolation("error inserting record".into()));
        let api = ApiError::from(err);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_store_is_server_error() {
        let err = ServiceError::from(StoreError::Unavailable("gone".into()));
        assert_eq!(ApiError::from(err).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_not_found_becomes_not_found() {
        let err = ServiceError::from(StoreError::NotFound(RecordId::new(9999)));
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn store_validation_becomes_validation() {
        let err = ServiceError::from(StoreError::Invalid(TypeError::BlankName));
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "A null or blank name is invalid."));
    }
}
