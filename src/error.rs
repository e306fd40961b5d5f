//! Error types for SSIS.

use thiserror::Error;

use crate::auth::PasswordError;
use crate::validation::ValidationError;

/// Common error type for SSIS.
#[derive(Error, Debug)]
pub enum SsisError {
    /// Database error.
    ///
    /// Wraps any storage failure not otherwise classified. Errors from sqlx
    /// are converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials, bad/expired/revoked token).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A name or code that must be unique is already taken.
    #[error("{0} already exists")]
    DuplicateName(String),

    /// Username already registered.
    #[error("username already exists")]
    DuplicateUsername,

    /// Email already registered.
    #[error("email already exists")]
    DuplicateEmail,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for SsisError {
    fn from(e: sqlx::Error) -> Self {
        SsisError::Database(e.to_string())
    }
}

/// Returns the constraint message if `err` is a unique-constraint violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.message().to_string())
        }
        _ => None,
    }
}

/// Returns true if `err` is a foreign-key violation.
pub(crate) fn foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Result type alias for SSIS operations.
pub type Result<T> = std::result::Result<T, SsisError>;
