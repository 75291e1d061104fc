//! HTTP-facing errors and their status codes.
//!
//! Every variant carries only the message the client is allowed to see.
//! Internal detail is logged where the error is created.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::ServiceError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Undecodable body or a missing required field.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("TODO not found")]
    NotFound,

    /// Service or encoding failure.
    #[error("{0}")]
    Internal(&'static str),

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// The operation a service error came from. Decides whether `NotFound`
/// reaches the client as 404 and which message a failure carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create TODO",
            Operation::Update => "Failed to update TODO",
            Operation::Delete => "Failed to delete TODO",
        }
    }
}

impl ApiError {
    /// Map a service error for `op`. Create never reports 404: any error
    /// from it is a failure.
    pub fn from_service(op: Operation, e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { ids } if op != Operation::Create => {
                tracing::info!(operation = ?op, ?ids, "todo not found");
                ApiError::NotFound
            }
            other => {
                tracing::error!(operation = ?op, error = %other, "service call failed");
                ApiError::Internal(op.failure_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::BadRequest("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn not_found_maps_to_404_for_update_and_delete() {
        for op in [Operation::Update, Operation::Delete] {
            let err = ApiError::from_service(op, ServiceError::not_found(3));
            assert_eq!(err, ApiError::NotFound);
        }
    }

    #[test]
    fn create_reports_every_service_error_as_failure() {
        let err = ApiError::from_service(Operation::Create, ServiceError::not_found(3));
        assert_eq!(err, ApiError::Internal("Failed to create TODO"));
    }

    #[test]
    fn storage_error_detail_is_not_exposed() {
        let err = ApiError::from_service(
            Operation::Update,
            ServiceError::Storage("connection refused on 10.0.0.5".to_string()),
        );
        assert_eq!(err, ApiError::Internal("Failed to update TODO"));
        assert!(!err.to_string().contains("10.0.0.5"));
    }
}
