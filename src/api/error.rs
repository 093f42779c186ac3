//! API error handling.
//!
//! Every failure reaches the caller as `{"message": ..., "long_message": ...}`,
//! including bodies and query strings axum could not deserialize.
//! Caller mistakes are `400 Bad Request`; store failures are `500` and only
//! their generic text leaves the process.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::application::ServiceError;
use crate::domain::ClientError;
use crate::infrastructure::RepositoryError;

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Short summary.
    pub message: String,
    /// Explanation of what the caller should send instead.
    pub long_message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>, long_message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            long_message: long_message.into(),
        }
    }
}

impl From<&ClientError> for ApiError {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::InvalidIdentifier(_) => {
                Self::new("Invalid id provided.", "Id can only be integer.")
            }
            ClientError::IdentifierNotFound(_) => {
                Self::new("Invalid id provided.", "Cannot find client with that id.")
            }
            ClientError::InvalidPriority(_) => Self::new(
                "Invalid priority provided.",
                "Priority can only be positive integer.",
            ),
            ClientError::InvalidStatus(_) => Self::new(
                "Invalid status provided.",
                "Status can only be one of the following: [backlog | in-progress | complete].",
            ),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, long_message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(message, long_message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(
                "Internal server error.",
                "An unexpected error occurred while accessing the client store.",
            ),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ClientError> for ApiErrorResponse {
    fn from(error: ClientError) -> Self {
        tracing::debug!(%error, "Rejected client request");
        Self::new(StatusCode::BAD_REQUEST, ApiError::from(&error))
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        tracing::error!(%error, "Client store failure");
        Self::internal_error()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Client(error) => error.into(),
            ServiceError::Repository(error) => error.into(),
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        Self::bad_request("Invalid request body.", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "Rejected query string");
        Self::bad_request("Invalid query string.", rejection.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================
