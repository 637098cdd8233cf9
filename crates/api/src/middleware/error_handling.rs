//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the GymTrack API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! Every error response carries the body `{"success": false, "message": ...}`;
//! diagnostic detail stays in the server-side logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gymtrack_core::errors::GymError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `GymError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub GymError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            GymError::NotFound(_) => StatusCode::NOT_FOUND,
            GymError::Validation(_) => StatusCode::BAD_REQUEST,
            GymError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GymError::Authorization(_) => StatusCode::FORBIDDEN,
            GymError::Conflict(_) => StatusCode::CONFLICT,
            GymError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GymError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Database and internal failures are logged with full detail; the
        // response body only carries the generic message.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {:?}", self.0);
        }

        let message = match &self.0 {
            GymError::Database(_) => "Internal server error".to_string(),
            GymError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let body = Json(json!({ "success": false, "message": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from GymError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, GymError>` in handler functions that return `Result<T, AppError>`.
impl From<GymError> for AppError {
    fn from(err: GymError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return `Result<T, AppError>`.
/// It wraps the eyre error in a GymError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(GymError::Database(err))
    }
}
