//! Mapping of service errors onto HTTP responses.

use super::envelope::ApiErrorBody;
use crate::todo::services::TodoServiceError;
use crate::user::services::UserServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Message used for every unresolved identifier.
pub const NOT_FOUND_MESSAGE: &str = "record not found";

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error envelope.
    pub body: ApiErrorBody,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                status: "error",
                message: message.into(),
                id,
            },
        }
    }

    /// Creates a 404 response for `id`.
    #[must_use]
    pub fn not_found(id: impl ToString) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            NOT_FOUND_MESSAGE,
            Some(id.to_string()),
        )
    }

    /// Creates a 400 response.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    /// Creates a 500 response. Details stay in the log.
    #[must_use]
    pub fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", None)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<TodoServiceError> for ApiErrorResponse {
    fn from(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::NotFound(id) => Self::not_found(id),
            TodoServiceError::InvalidInput(domain) => Self::invalid_input(domain.to_string()),
            TodoServiceError::Repository(repository) => Self::internal(&repository),
        }
    }
}

impl From<UserServiceError> for ApiErrorResponse {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound(id) => Self::not_found(id),
            UserServiceError::Directory(directory) => Self::internal(&directory),
        }
    }
}
