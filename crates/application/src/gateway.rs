//! Hooks applied around every outgoing API request.
//!
//! Before dispatch the credential is refreshed if it is close to expiry and
//! attached as a bearer token. After receipt a 401 clears the session, except
//! for the logout call itself, which clears the session on its own.

use tracing::{debug, warn};

use crate::session::SessionHandle;

/// Path of the logout endpoint.
pub const LOGOUT_PATH: &str = "/auth/logout";

const UNAUTHORIZED: u16 = 401;

/// Applies session handling to requests issued by a transport.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    session: SessionHandle,
}

impl RequestGateway {
    /// Creates a gateway over the given session.
    #[must_use]
    pub const fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// The session this gateway reads from.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Returns the bearer credential to attach, refreshing it first if due.
    ///
    /// `None` means the request goes out unauthenticated.
    pub async fn before_dispatch(&self) -> Option<String> {
        if !self.session.ensure_fresh().await {
            debug!("proactive refresh failed, sending request without credential");
        }
        self.session.current_credential().await
    }

    /// Inspects a response status. Returns true if the session was invalidated.
    pub async fn after_receipt(&self, status: u16, path: &str) -> bool {
        if status != UNAUTHORIZED || is_logout_path(path) {
            return false;
        }
        warn!(path, "request unauthorized, clearing session");
        self.session.invalidate().await;
        true
    }
}

/// True when `path` addresses the logout endpoint.
#[must_use]
pub fn is_logout_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').ends_with(LOGOUT_PATH)
}
