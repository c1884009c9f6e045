// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::validation::FieldError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 400 Bad Request with per-field messages, as displayed next to the
    // form inputs
    Validation(Vec<FieldError>),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (duplicate booking dates, room cap reached)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal Server Error"}),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            AppError::Validation(field_errors) => {
                let mut errors = serde_json::Map::new();
                for fe in field_errors {
                    // First violated rule wins per field.
                    errors
                        .entry(fe.field)
                        .or_insert_with(|| json!(fe.message));
                }
                (StatusCode::BAD_REQUEST, json!({"errors": errors}))
            }
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, json!({"error": msg})),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({"error": msg})),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({"error": msg})),
        };

        (status, Json(body)).into_response()
    }
}

/// Converts `std::io::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on store file access.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
