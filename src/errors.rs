//! Centralized error handling.
//!
//! Provides a unified error type for the whole crate, with stable
//! error codes and user-safe messages for whatever transport sits on top.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation (one message per failed rule)
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    // Credential hashing
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Hashing(_) => "HASHING_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(messages) => messages.join("; "),
            AppError::Conflict(entity) => format!("{} already exists", entity),

            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Hashing(msg) => {
                tracing::error!("Hashing error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Messages collected by validation, if this is a validation failure
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            AppError::Validation(messages) => Some(messages),
            _ => None,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn hashing(msg: impl Into<String>) -> Self {
        AppError::Hashing(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Translate a write failure, turning unique-constraint violations into
    /// `Conflict`. `subjects` maps column names found in the driver message
    /// to labels; `fallback` names the entity when none matches.
    pub fn from_write(err: DbErr, subjects: &[(&str, &str)], fallback: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                let detail = detail.to_lowercase();
                let entity = subjects
                    .iter()
                    .find(|(column, _)| detail.contains(column))
                    .map(|(_, label)| *label)
                    .unwrap_or(fallback);
                AppError::conflict(entity)
            }
            _ => AppError::Database(err),
        }
    }
}
