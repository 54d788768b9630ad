//! Persisted form of the session.
//!
//! The session is mirrored under three independent keys. Any missing or
//! malformed key means there is no session to restore.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use classroom_domain::{Session, UserRecord};

use crate::ports::{KeyValueStore, StorageError};

/// Key holding the bearer credential.
pub const TOKEN_KEY: &str = "auth_token";

/// Key holding the JSON user record.
pub const USER_KEY: &str = "auth_user";

/// Key holding the expiry instant as epoch milliseconds.
pub const EXPIRY_KEY: &str = "auth_token_expiry";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, EXPIRY_KEY];

/// Why a persisted session could not be rebuilt.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// One of the keys is absent.
    #[error("missing key {0}")]
    Missing(&'static str),

    /// A key holds content that cannot be parsed.
    #[error("malformed {key}: {reason}")]
    Malformed {
        /// Offending key.
        key: &'static str,
        /// Parse failure.
        reason: String,
    },

    /// The backend itself failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reads and writes the session triple on a key-value backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Wraps a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Rebuilds the persisted session. Expiry is not checked here.
    ///
    /// # Errors
    ///
    /// Returns a [`RestoreError`] when any key is missing or malformed.
    pub fn load(&self) -> Result<Session, RestoreError> {
        let credential = self.required(TOKEN_KEY)?;
        if credential.is_empty() {
            return Err(RestoreError::Malformed {
                key: TOKEN_KEY,
                reason: "empty credential".to_string(),
            });
        }

        let user = UserRecord::from_persisted(&self.required(USER_KEY)?).map_err(|e| {
            RestoreError::Malformed {
                key: USER_KEY,
                reason: e.to_string(),
            }
        })?;

        let raw_expiry = self.required(EXPIRY_KEY)?;
        let expires_at = raw_expiry
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| RestoreError::Malformed {
                key: EXPIRY_KEY,
                reason: format!("not an epoch-millisecond timestamp: {raw_expiry}"),
            })?;

        Ok(Session {
            user,
            credential,
            expires_at,
        })
    }

    /// Writes all three keys.
    ///
    /// # Errors
    ///
    /// Returns the first backend error; keys written before it stay written.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.backend.set(TOKEN_KEY, &session.credential)?;
        self.backend.set(USER_KEY, &user)?;
        self.backend
            .set(EXPIRY_KEY, &session.expires_at.timestamp_millis().to_string())?;
        Ok(())
    }

    /// Removes all three keys, attempting every key even if one fails.
    ///
    /// # Errors
    ///
    /// Returns the first backend error encountered.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.backend.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn required(&self, key: &'static str) -> Result<String, RestoreError> {
        self.backend.get(key)?.ok_or(RestoreError::Missing(key))
    }
}
