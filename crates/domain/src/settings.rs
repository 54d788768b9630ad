//! Client Settings Domain Model
//!
//! Defines the tunables of the classroom client: where the service lives,
//! how long requests may take and how the session lifetime is tracked.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Default service endpoint.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Token lifetime granted by the service, in minutes.
pub const DEFAULT_TOKEN_LIFETIME_MINS: i64 = 30;

/// Lead time before expiry that triggers a proactive refresh, in minutes.
pub const DEFAULT_REFRESH_SKEW_MINS: i64 = 5;

/// Longest credential lifetime accepted from configuration, in minutes (one week).
pub const MAX_TOKEN_LIFETIME_MINS: i64 = 7 * 24 * 60;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the classroom service, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout enforced by the transport.
    pub request_timeout_secs: u64,
    /// Lifetime assumed for every issued credential.
    pub token_lifetime_mins: i64,
    /// Skew window for proactive refresh.
    pub refresh_skew_mins: i64,
    /// Where the session key-value file lives. `None` uses the platform data directory.
    pub state_file: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_lifetime_mins: DEFAULT_TOKEN_LIFETIME_MINS,
            refresh_skew_mins: DEFAULT_REFRESH_SKEW_MINS,
            state_file: None,
        }
    }
}

impl ClientSettings {
    /// Returns the request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks the session timing values.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSetting`] when the lifetime is not within
    /// `1..=MAX_TOKEN_LIFETIME_MINS` or the skew is negative or not shorter
    /// than the lifetime.
    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=MAX_TOKEN_LIFETIME_MINS).contains(&self.token_lifetime_mins) {
            return Err(DomainError::InvalidSetting(format!(
                "token_lifetime_mins must be between 1 and {MAX_TOKEN_LIFETIME_MINS}, got {}",
                self.token_lifetime_mins
            )));
        }
        if !(0..self.token_lifetime_mins).contains(&self.refresh_skew_mins) {
            return Err(DomainError::InvalidSetting(format!(
                "refresh_skew_mins must be at least 0 and below token_lifetime_mins ({}), got {}",
                self.token_lifetime_mins, self.refresh_skew_mins
            )));
        }
        Ok(())
    }

    /// Returns the credential lifetime, clamped to the accepted range.
    #[must_use]
    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_lifetime_mins.clamp(1, MAX_TOKEN_LIFETIME_MINS))
    }

    /// Returns the refresh skew window, clamped to the accepted range.
    #[must_use]
    pub fn refresh_skew(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.refresh_skew_mins.clamp(0, MAX_TOKEN_LIFETIME_MINS))
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8000");
        assert_eq!(settings.token_lifetime(), chrono::Duration::minutes(30));
        assert_eq!(settings.refresh_skew(), chrono::Duration::minutes(5));
        assert_eq!(settings.request_timeout().as_secs(), 10);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"api_base_url":"https://school.example/api/"}"#)
                .unwrap_or_default();
        assert_eq!(settings.normalized_base_url(), "https://school.example/api");
        assert_eq!(settings.refresh_skew_mins, 5);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(ClientSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_timing() {
        for (lifetime, skew) in [(0, 0), (-30, 5), (i64::MAX / 2, 5), (30, -1), (30, 30)] {
            let settings = ClientSettings {
                token_lifetime_mins: lifetime,
                refresh_skew_mins: skew,
                ..ClientSettings::default()
            };
            assert!(
                matches!(settings.validate(), Err(DomainError::InvalidSetting(_))),
                "lifetime {lifetime}, skew {skew} should be rejected"
            );
        }
    }

    #[test]
    fn test_durations_are_clamped() {
        let settings = ClientSettings {
            token_lifetime_mins: i64::MAX / 2,
            refresh_skew_mins: i64::MIN,
            ..ClientSettings::default()
        };
        assert_eq!(
            settings.token_lifetime(),
            chrono::Duration::minutes(MAX_TOKEN_LIFETIME_MINS)
        );
        assert_eq!(settings.refresh_skew(), chrono::Duration::zero());
    }
}
