//! Submission and grading types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Highest accepted score.
pub const MAX_SCORE: f64 = 100.0;

/// Longest accepted grading report, in characters.
pub const MAX_REPORT_CHARS: usize = 2000;

/// Payload for `PUT /submissions/{id}/grade`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Score between 0 and 100.
    pub score: f64,
    /// Feedback for the student.
    pub report: String,
}

impl Grade {
    /// Builds a grade, checking the ranges the service enforces.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidScore`] for a score outside `0..=100`
    /// and [`DomainError::InvalidRecord`] for an empty or oversized report.
    pub fn new(score: f64, report: impl Into<String>) -> DomainResult<Self> {
        if !(0.0..=MAX_SCORE).contains(&score) {
            return Err(DomainError::InvalidScore(format!(
                "{score} is outside 0..={MAX_SCORE}"
            )));
        }
        let report = report.into();
        let len = report.chars().count();
        if len == 0 || len > MAX_REPORT_CHARS {
            return Err(DomainError::InvalidRecord(format!(
                "report must be 1..={MAX_REPORT_CHARS} characters, got {len}"
            )));
        }
        Ok(Self { score, report })
    }
}

/// A student's view of one of their submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSubmission {
    /// Submission id.
    pub id: i64,
    /// Assignment title.
    pub assignment_title: String,
    /// Assignment id.
    pub assignment_id: i64,
    /// Class id.
    pub class_id: i64,
    /// Class name.
    pub class_name: String,
    /// Score once graded.
    #[serde(default)]
    pub score: Option<f64>,
    /// Upload time.
    #[serde(with = "crate::timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Whether a teacher graded it.
    pub is_graded: bool,
}

/// A teacher's view of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSubmission {
    /// Submission id.
    pub id: i64,
    /// Submitting student id.
    pub student_id: i64,
    /// Submitting student name.
    pub student_name: String,
    /// Assignment title.
    pub assignment_title: String,
    /// Assignment id.
    pub assignment_id: i64,
    /// Class id.
    pub class_id: i64,
    /// Class name.
    pub class_name: String,
    /// Score once graded.
    #[serde(default)]
    pub score: Option<f64>,
    /// Upload time.
    #[serde(with = "crate::timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Whether it has been graded.
    pub is_graded: bool,
}

/// Full submission record, including the parsed document and report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionDetail {
    /// Submission id.
    pub id: i64,
    /// Submitting student name.
    pub student_name: String,
    /// Assignment title.
    pub assignment_title: String,
    /// Class id.
    pub class_id: i64,
    /// Class name.
    pub class_name: String,
    /// Service-side parse of the uploaded document, opaque to the client.
    #[serde(default)]
    pub file_json: Option<serde_json::Value>,
    /// Grading report.
    #[serde(default)]
    pub report: Option<String>,
    /// Score.
    #[serde(default)]
    pub score: Option<f64>,
    /// Upload time.
    #[serde(with = "crate::timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Grading time.
    #[serde(default, with = "crate::timestamp::option")]
    pub graded_at: Option<DateTime<Utc>>,
    /// Whether it has been graded.
    pub is_graded: bool,
}

/// Acknowledgement of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// New submission id.
    pub id: i64,
    /// Assignment title.
    pub assignment_title: String,
    /// Upload time.
    #[serde(with = "crate::timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Confirmation message.
    pub message: String,
}

/// Aggregate grading numbers for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStatistics {
    /// All submissions.
    pub total_submissions: u32,
    /// Graded submissions.
    pub graded_submissions: u32,
    /// Submissions awaiting a grade.
    pub ungraded_submissions: u32,
    /// Mean score of graded work.
    #[serde(default)]
    pub average_score: Option<f64>,
    /// Best score.
    #[serde(default)]
    pub highest_score: Option<f64>,
    /// Worst score.
    #[serde(default)]
    pub lowest_score: Option<f64>,
}

/// An assignment the student has not submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAssignment {
    /// Assignment id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Instructions.
    #[serde(default)]
    pub description: Option<String>,
    /// Class id.
    pub class_id: i64,
    /// Class name.
    pub class_name: String,
    /// Teacher name.
    pub teacher_name: String,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Due date, if set.
    #[serde(default, with = "crate::timestamp::option")]
    pub deadline: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_accepts_bounds() {
        assert!(Grade::new(0.0, "ok").is_ok());
        assert!(Grade::new(100.0, "ok").is_ok());
    }

    #[test]
    fn test_grade_rejects_out_of_range_score() {
        assert!(matches!(
            Grade::new(100.5, "ok"),
            Err(DomainError::InvalidScore(_))
        ));
        assert!(Grade::new(-1.0, "ok").is_err());
        assert!(Grade::new(f64::NAN, "ok").is_err());
    }

    #[test]
    fn test_grade_rejects_empty_report() {
        assert!(matches!(
            Grade::new(50.0, ""),
            Err(DomainError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_detail_with_missing_grade() {
        let detail: SubmissionDetail = serde_json::from_value(serde_json::json!({
            "id": 9,
            "student_name": "bob",
            "assignment_title": "Essay",
            "class_id": 3,
            "class_name": "Physics",
            "file_json": {"paragraphs": []},
            "report": null,
            "score": null,
            "submitted_at": "2025-01-02T10:00:00",
            "graded_at": null,
            "is_graded": false
        }))
        .unwrap();

        assert!(!detail.is_graded);
        assert_eq!(detail.graded_at, None);
        assert!(detail.file_json.is_some());
    }
}
