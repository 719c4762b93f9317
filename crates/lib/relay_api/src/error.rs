//! Application error types.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::relay::RelayError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to read request body: {0}")]
    BodyRejected(#[from] BytesRejection),

    #[error("AI Error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(m) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: m,
                    details: None,
                },
            ),
            AppError::InvalidBody(m) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request body".into(),
                    details: Some(m),
                },
            ),
            // Keeps the rejection's own status (413 for oversized bodies).
            AppError::BodyRejected(rejection) => return rejection.into_response(),
            AppError::Upstream(m) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "AI Error".into(),
                    details: Some(m),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::BadRequest => AppError::BadRequest(e.to_string()),
            RelayError::Upstream(inner) => AppError::Upstream(inner.to_string()),
        }
    }
}
