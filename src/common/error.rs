use super::response::{ApiError, ApiResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt::Display;
use tracing::error;
use validator::ValidationErrors;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Logs `cause` and hides it behind a fixed message.
    pub fn internal(message: impl Into<String>, cause: impl Display) -> Self {
        let message = message.into();
        error!(error = %cause, "{}", message);
        AppError::Internal(message)
    }

    /// Domain errors pass through, persistence failures collapse into `Internal(message)`.
    pub fn or_internal(self, message: &str) -> Self {
        match self {
            AppError::Database(e) => AppError::internal(message, e),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::Validation(errors) => (
                status,
                Json(ApiResponse::error_with("Validation failed", errors)),
            )
                .into_response(),
            AppError::Database(e) => {
                error!(error = %e, "Unhandled database error");
                ApiError("Internal server error".to_string(), status).into_response()
            }
            other => ApiError(other.to_string(), status).into_response(),
        }
    }
}
