//! Session lifecycle
//!
//! A [`SessionManager`] owns the current session and is driven through a
//! [`SessionHandle`]. The session is mirrored to a key-value store so it
//! survives restarts.

mod manager;
mod status;
mod store;
#[cfg(test)]
pub(crate) mod test_support;

pub use manager::{
    LOGIN_FAILED, REGISTRATION_FAILED, SessionConfig, SessionHandle, SessionManager,
};
pub use status::SessionStatus;
pub use store::{EXPIRY_KEY, RestoreError, SessionStore, TOKEN_KEY, USER_KEY};
