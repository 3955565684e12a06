use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::shared::api::ApiResponse;

/// The error alphabet from spec.md §7. Repository and Publisher errors
/// are translated into this set at the Service boundary; nothing below
/// this layer leaks a backend-specific error type to a route handler.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("project not found")]
    ProjectNotFound,

    #[error("parent project not found")]
    InvalidParentProject,

    #[error("slug already exists")]
    SlugExists,

    #[error("revision mismatch")]
    RevisionMismatch,

    #[error("stored record could not be decoded: {0}")]
    Unmarshal(String),

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::ProjectNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidParentProject => StatusCode::BAD_REQUEST,
            AppError::SlugExists => StatusCode::CONFLICT,
            AppError::RevisionMismatch => StatusCode::PRECONDITION_FAILED,
            AppError::Unmarshal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        ApiResponse::<()>::error(self.status_code(), code, &self.to_string())
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationFailed(_) => "VALIDATION_FAILED",
            AppError::ProjectNotFound => "PROJECT_NOT_FOUND",
            AppError::InvalidParentProject => "INVALID_PARENT_PROJECT",
            AppError::SlugExists => "SLUG_EXISTS",
            AppError::RevisionMismatch => "REVISION_MISMATCH",
            AppError::Unmarshal(_) => "UNMARSHAL_FAILED",
            AppError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
