//! Unified error types for `InsureMyWay`.
//!
//! A single error enum covers configuration, database, validation, and HTTP
//! concerns. The `IntoResponse` impl maps each variant to a status code and a
//! JSON body so handlers can simply return `Result<_, Error>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application error type used throughout the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// User-supplied input failed validation
    #[error("{message}")]
    Validation {
        /// User-facing validation message
        message: String,
    },

    /// Uniqueness constraint violated (duplicate username/email)
    #[error("{message}")]
    Conflict {
        /// User-facing conflict message
        message: String,
    },

    /// A referenced record does not exist
    #[error("{what} not found")]
    NotFound {
        /// Which record was missing
        what: String,
    },

    /// No logged-in user in the session
    #[error("Please log in")]
    Unauthorized,

    /// Logged-in user lacks admin privileges
    #[error("Access denied: admin privileges required")]
    Forbidden,

    /// Password hashing or verification failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Session store read or write failed
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Database(e) => {
                tracing::error!("Database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Config { .. } | Error::PasswordHash(_) | Error::Session(_) | Error::Io(_) => {
                tracing::error!("Internal error: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
