//! Error types for todo-store
//!
//! Only a uniqueness violation gets its own variant; callers recover from it
//! ("title already in use"). Every other storage failure is wrapped as-is and
//! propagated.

use thiserror::Error;

use crate::models::ValidationError;

/// Result type alias for todo-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected a write because of a UNIQUE constraint
    /// (SQLSTATE 23505).
    #[error(
        "duplicate value violates {}: {message}",
        .constraint.as_deref().unwrap_or("a unique constraint")
    )]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Stored hash could not be parsed, or verification could not run
    #[error("credential check failed: {0}")]
    Credential(String),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl StoreError {
    /// Does this error come from a UNIQUE constraint?
    ///
    /// Classified from the driver's structured error kind when the error is
    /// converted, not by matching message text.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// Name of the violated constraint, when the database reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().map(str::to_owned),
                    message: db_err.message().to_owned(),
                };
            }
        }

        Self::Database(err)
    }
}
