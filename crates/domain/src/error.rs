//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A persisted record is malformed or misses a required field.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The role name is not one the service knows.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A grade lies outside the accepted range.
    #[error("invalid score: {0}")]
    InvalidScore(String),

    /// A configuration value is out of range.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
