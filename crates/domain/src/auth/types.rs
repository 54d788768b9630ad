//! Account and token types exchanged with the auth endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Role of an account on the classroom service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates classes and assignments, grades submissions.
    Teacher,
    /// Joins classes and submits work.
    Student,
}

impl UserRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated account as reported by `GET /auth/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Account id.
    pub id: i64,
    /// Login name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Rebuilds a user record from its persisted JSON form.
    ///
    /// The record must carry a non-zero `id`, a non-empty `name` and a known
    /// `role`; timestamps are optional.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRecord`] when the JSON is malformed or a
    /// required field is missing or empty.
    pub fn from_persisted(raw: &str) -> DomainResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::InvalidRecord(format!("user record: {e}")))?;

        let has_id = value
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .is_some_and(|id| id != 0);
        let has_name = value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|name| !name.is_empty());
        let has_role = value
            .get("role")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|role| !role.is_empty());

        if !(has_id && has_name && has_role) {
            return Err(DomainError::InvalidRecord(
                "user record requires id, name and role".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| DomainError::InvalidRecord(format!("user record: {e}")))
    }

    /// Returns true if the account has the given role.
    #[must_use]
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    /// Returns true for teacher accounts.
    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.has_role(UserRole::Teacher)
    }

    /// Returns true for student accounts.
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.has_role(UserRole::Student)
    }
}

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name.
    pub name: String,
    /// Plain-text password, sent once over the wire.
    pub password: String,
    /// Requested role.
    pub role: UserRole,
}

/// Bearer token issued by `POST /auth/login` and `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// The bearer credential.
    pub access_token: String,
    /// Token type, "bearer" on this service.
    pub token_type: String,
}

/// Acknowledgement returned by `POST /auth/logout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutReceipt {
    /// Human-readable confirmation.
    pub message: String,
    /// The account that was logged out.
    pub user_id: i64,
}
