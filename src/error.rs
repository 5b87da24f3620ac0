//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` used throughout the
//! application. Domain errors (`NotFound`, `Unauthorized`, `Conflict`, ...)
//! raised by a service pass through to the HTTP boundary unchanged; anything
//! unexpected is logged with its cause and replaced by a generic `Internal`
//! error so details never leak to the client.
//!
//! `AppError` implements `actix_web::error::ResponseError`, turning every
//! variant into a JSON body of the form `{"statusCode": <code>, "message": <text>}`.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` keep the `?`
//! operator usable in services and handlers.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all error conditions the API can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing input (HTTP 400). Carries per-field messages
    /// joined as `"field - message; field - message"`.
    Validation(String),
    /// Failed authentication, or acting outside one's own resource (HTTP 401).
    Unauthorized(String),
    /// Authenticated but lacking the required role (HTTP 403).
    Forbidden(String),
    /// Resource absent, or filtered out so it looks absent (HTTP 404).
    NotFound(String),
    /// Duplicate of a uniquely-constrained resource, e.g. email (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500). The cause is logged where
    /// the error is raised; only the fixed message crosses the boundary.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "statusCode": self.status_code().as_u16(),
            "message": self.message(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; every other database error is logged
/// here with its cause and surfaced as a generic `Internal` error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            other => {
                log::error!("database error: {}", other);
                AppError::Internal("An unexpected error occurred".into())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// flattening field errors into `"field - msg, msg; field - msg"` (fields
/// sorted for a deterministic message).
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} - {}", field, messages)
            })
            .collect();
        parts.sort();
        AppError::Validation(parts.join("; "))
    }
}

/// JWT processing failures (bad signature, expiry, malformed token) are
/// authentication failures from the caller's point of view.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        log::error!("bcrypt error: {}", error);
        AppError::Internal("An unexpected error occurred".into())
    }
}
