//! Class (course group) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for `POST /classes/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for `PUT /classes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The caller's relationship to a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassRole {
    /// Created the class.
    MainTeacher,
    /// Joined as an assistant.
    AssistantTeacher,
    /// Enrolled student.
    Student,
}

/// A class as listed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Class id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short join code.
    pub class_code: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Id of the main teacher.
    pub teacher_id: i64,
    /// Name of the main teacher.
    pub teacher_name: String,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Number of enrolled students.
    #[serde(default)]
    pub student_count: u32,
    /// The caller's role in this class.
    pub my_role: ClassRole,
}

/// A student entry in a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterStudent {
    /// Student account id.
    pub id: i64,
    /// Student name.
    pub name: String,
    /// Enrollment time.
    #[serde(with = "crate::timestamp")]
    pub joined_at: DateTime<Utc>,
}

/// A class with its enrolled students (`GET /classes/{id}/students`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoster {
    /// Class id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Id of the main teacher.
    pub teacher_id: i64,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Number of enrolled students.
    pub student_count: u32,
    /// Enrolled students.
    pub students: Vec<RosterStudent>,
}

/// Payload for the join endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinClass {
    /// Class to join.
    pub class_id: i64,
}

/// Payload for `POST /classes/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSearch {
    /// Matched against class names and codes.
    pub search_term: String,
}

/// Enrollment created by `POST /classes/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment id.
    pub id: i64,
    /// Enrolled student.
    pub student_id: i64,
    /// Target class.
    pub class_id: i64,
    /// Enrollment time.
    #[serde(with = "crate::timestamp")]
    pub joined_at: DateTime<Utc>,
}
