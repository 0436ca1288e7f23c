use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    ConfigError(String),
    StorageError(String),
    InternalError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    AutoConfirmFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::AutoConfirmFailed(msg) => write!(f, "Auto-confirm failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "server configuration error" }),
                )
            }
            AppError::StorageError(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::InternalError(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::AutoConfirmFailed(ref details) => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "user not confirmed and auto-confirm failed",
                    "details": details,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
