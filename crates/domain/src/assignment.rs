//! Assignment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for `POST /assignments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    /// Title shown to students.
    pub title: String,
    /// Optional instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning class.
    pub class_id: i64,
}

/// Partial update for `PUT /assignments/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An assignment as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Instructions.
    #[serde(default)]
    pub description: Option<String>,
    /// Owning class.
    pub class_id: i64,
    /// Owning class name.
    pub class_name: String,
    /// Author id.
    pub teacher_id: i64,
    /// Author name.
    pub teacher_name: String,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}
