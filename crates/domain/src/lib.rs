//! Classroom Domain - Core business types
//!
//! This crate defines the domain model for the Classroom API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod assignment;
pub mod auth;
pub mod class;
pub mod error;
pub mod settings;
pub mod submission;
pub mod timestamp;

pub use assignment::{Assignment, AssignmentUpdate, NewAssignment};
pub use auth::{LogoutReceipt, NewUser, Session, TokenGrant, UserRecord, UserRole};
pub use class::{
    ClassRole, ClassRoster, ClassSearch, ClassSummary, ClassUpdate, Enrollment, JoinClass,
    NewClass, RosterStudent,
};
pub use error::{DomainError, DomainResult};
pub use settings::ClientSettings;
pub use submission::{
    Grade, PendingAssignment, StudentSubmission, SubmissionDetail, SubmissionReceipt,
    SubmissionStatistics, TeacherSubmission,
};
