//! The authenticated session held by the client

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::UserRecord;

/// A complete client session.
///
/// A session always carries both the user and the credential; an absent
/// session is modelled as `Option<Session>` so no partial state exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in account.
    pub user: UserRecord,
    /// The bearer credential.
    pub credential: String,
    /// When the credential stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session whose credential lives for `lifetime` from `now`.
    #[must_use]
    pub fn issued(
        user: UserRecord,
        credential: String,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            user,
            credential,
            expires_at: expiry(now, lifetime),
        }
    }

    /// True once `now` is past the expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// True once `now` has entered the skew window before expiry.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(skew)
            .is_none_or(|boundary| now >= boundary)
    }

    /// Whole seconds left before expiry (negative once expired).
    #[must_use]
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }

    /// Replaces the credential and pushes the expiry out, keeping the user.
    pub fn renew(&mut self, credential: String, now: DateTime<Utc>, lifetime: Duration) {
        self.credential = credential;
        self.expires_at = expiry(now, lifetime);
    }

    /// Short preview of the credential, safe to log.
    #[must_use]
    pub fn credential_preview(&self) -> String {
        if self.credential.chars().count() > 12 {
            let head: String = self.credential.chars().take(8).collect();
            format!("{head}...")
        } else {
            "***".to_string()
        }
    }
}

/// `now + lifetime`, saturating at the latest representable instant.
fn expiry(now: DateTime<Utc>, lifetime: Duration) -> DateTime<Utc> {
    now.checked_add_signed(lifetime)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
