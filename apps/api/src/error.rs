use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campusline_core::AppError;
use tracing::{error, warn};

use crate::dto::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self.0 {
            AppError::Forbidden(message) => warn!(message = %message, "request denied"),
            AppError::Internal(message) => error!(message = %message, "request failed"),
            AppError::InvalidInput(_) | AppError::NotFound(_) => {}
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
