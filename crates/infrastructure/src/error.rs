//! Transport error types

use classroom_application::ports::AuthApiError;

/// Message used when an error response carries no `detail`.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Errors raised while talking to the classroom service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// Name resolution failed.
    #[error("could not resolve {host}: {message}")]
    Dns {
        /// Host being resolved.
        host: String,
        /// Underlying error.
        message: String,
    },

    /// The service refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The service answered with a non-success status.
    #[error("{} (status {status})", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error payload, if any.
        detail: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The configured base URL or a request path is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// HTTP status of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service-provided explanation, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

impl From<ClientError> for AuthApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Timeout { .. } => Self::Timeout,
            ClientError::Status { status, detail } => Self::Rejected { status, detail },
            ClientError::Decode(message) => Self::InvalidResponse(message),
            other => Self::Network(other.to_string()),
        }
    }
}
