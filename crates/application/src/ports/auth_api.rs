//! Auth service port
//!
//! Defines the calls the session manager makes against the external
//! authentication endpoints. Credentials are passed explicitly so the port
//! never needs to consult the session it is serving.

use async_trait::async_trait;
use classroom_domain::{LogoutReceipt, NewUser, TokenGrant, UserRecord};

/// Errors reported by the auth service port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthApiError {
    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// `detail` message from the error payload, if any.
        detail: Option<String>,
    },

    /// The service answered with a body the client could not read.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl AuthApiError {
    /// The service-provided explanation, if the error carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

/// Port for the authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/register`.
    async fn register(&self, user: &NewUser) -> Result<UserRecord, AuthApiError>;

    /// `POST /auth/login` with form-encoded credentials.
    async fn login(&self, name: &str, password: &str) -> Result<TokenGrant, AuthApiError>;

    /// `GET /auth/dashboard` for the bearer of `credential`.
    async fn current_user(&self, credential: &str) -> Result<UserRecord, AuthApiError>;

    /// `POST /auth/refresh`, exchanging `credential` for a fresh one.
    async fn refresh(&self, credential: &str) -> Result<TokenGrant, AuthApiError>;

    /// `POST /auth/logout`.
    async fn logout(&self, credential: &str) -> Result<LogoutReceipt, AuthApiError>;
}
