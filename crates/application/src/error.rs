//! Application error types

use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The auth service refused the operation. `reason` is meant for the user.
    #[error("{reason}")]
    Auth {
        /// Human-readable explanation, taken from the service when available.
        reason: String,
    },

    /// The session manager task has stopped.
    #[error("session manager is not running")]
    SessionClosed,
}

impl ApplicationError {
    /// Builds an auth failure with the given reason.
    #[must_use]
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
