//! Session status for display.

use classroom_domain::UserRecord;

/// Snapshot of the session, as seen after expired state has been evicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nobody is logged in.
    Unauthenticated,
    /// Logged in and outside the refresh window.
    Active {
        /// The logged-in account.
        user: UserRecord,
        /// Seconds until the credential expires.
        seconds_remaining: i64,
    },
    /// Logged in, and the next request will try to refresh the credential.
    Expiring {
        /// The logged-in account.
        user: UserRecord,
        /// Seconds until the credential expires.
        seconds_remaining: i64,
    },
}

impl SessionStatus {
    /// Returns true if a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Active { .. } | Self::Expiring { .. })
    }

    /// The logged-in account, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Unauthenticated => None,
            Self::Active { user, .. } | Self::Expiring { user, .. } => Some(user),
        }
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Not logged in".to_string(),
            Self::Active {
                user,
                seconds_remaining,
            } => {
                let remaining = if *seconds_remaining > 60 {
                    format!("{} minutes", seconds_remaining / 60)
                } else {
                    format!("{seconds_remaining} seconds")
                };
                format!("Logged in as {} ({}), valid for {remaining}", user.name, user.role)
            }
            Self::Expiring {
                user,
                seconds_remaining,
            } => format!(
                "Logged in as {} ({}), expiring in {seconds_remaining} seconds (will refresh)",
                user.name, user.role
            ),
        }
    }
}
