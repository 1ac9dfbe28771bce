//! # Error Handling
//!
//! This module defines the application error type and how each variant is
//! turned into an HTTP response.
//!
//! Every failure leaves the server in the same JSON envelope the success
//! paths use:
//!
//! ```json
//! {
//!   "success": false,
//!   "response": "Credentials do not match",
//!   "message": "Credentials do not match",
//!   "error": null
//! }
//! ```
//!
//! Three kinds of failure reach clients: validation errors (400),
//! authorization errors (403) and unexpected persistence errors (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-wide error type
///
/// The `#[from]` attribute on `Database` lets `?` convert `sqlx::Error`
/// directly, so store functions stay free of manual error wrapping.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lookup in the account store matched nothing
    ///
    /// Handlers translate this into a domain response (credentials mismatch,
    /// please log in, ...) so it rarely reaches the client as-is.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client sent invalid data
    #[error("{0}")]
    BadRequest(String),

    /// Account creation failed
    ///
    /// Duplicate usernames, constraint violations and store outages all
    /// collapse into this one response. Field validation messages, when
    /// there are any, are passed along in the `error` member.
    #[error("Could not create user")]
    CreateFailed(Option<String>),

    /// Unknown username or wrong password
    ///
    /// Both cases share this variant so the response can't be used to probe
    /// for existing usernames.
    #[error("Credentials do not match")]
    InvalidCredentials,

    /// The presented token no longer resolves to an account
    #[error("Could not find user")]
    UserNotFound,

    /// Missing, empty or stale access token on a protected route
    #[error("Please log in")]
    Unauthenticated,

    /// Internal server errors (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and client-facing message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Database(e) => {
                // Log the detail, hide it from the client
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_)
            | AppError::CreateFailed(_)
            | AppError::InvalidCredentials
            | AppError::UserNotFound => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthenticated => (StatusCode::FORBIDDEN, self.to_string()),
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::CreateFailed(Some(detail)) => json!(detail),
            _ => Value::Null,
        }
    }
}

/// Convert AppError into an HTTP response
///
/// Handlers return `AppResult<T>` and axum calls this for the `Err` side.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "success": false,
            "response": message,
            "message": message,
            "error": self.details(),
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
