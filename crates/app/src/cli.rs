//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use classroom_domain::UserRole;

#[derive(Parser, Debug)]
#[command(name = "classroom")]
#[command(version, about = "Command-line client for the Classroom API", long_about = None)]
pub struct Cli {
    /// Settings file (TOML). Defaults to the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Service base URL, overriding configuration.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the session for later commands.
    Login {
        name: String,
        #[arg(long, env = "CLASSROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not log in.
    Register {
        name: String,
        #[arg(long, value_parser = parse_role)]
        role: UserRole,
        #[arg(long, env = "CLASSROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session, locally and on the service.
    Logout,
    /// Show the logged-in account and credential validity.
    Whoami,
    /// Exchange the credential for a fresh one.
    Refresh,
    /// Class management.
    #[command(subcommand)]
    Classes(ClassCommand),
    /// Assignment management.
    #[command(subcommand)]
    Assignments(AssignmentCommand),
    /// Submissions and grading.
    #[command(subcommand)]
    Submissions(SubmissionCommand),
}

#[derive(Subcommand, Debug)]
pub enum ClassCommand {
    /// Create a class.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Search classes by name or code.
    Search { term: String },
    /// Join a class as a student.
    Join { class_id: i64 },
    /// Join a class as an assistant teacher.
    JoinAsTeacher { class_id: i64 },
    /// List the caller's classes.
    List(ClassFilter),
    /// Show a class with its students.
    Roster { class_id: i64 },
    /// Rename or redescribe a class.
    Update {
        class_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a class.
    Delete { class_id: i64 },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct ClassFilter {
    /// Only classes the caller created.
    #[arg(long)]
    pub created: bool,
    /// Only classes the caller joined.
    #[arg(long)]
    pub joined: bool,
}

#[derive(Subcommand, Debug)]
pub enum AssignmentCommand {
    /// Create an assignment in a class.
    Create {
        class_id: i64,
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List assignments of a class, or the caller's own.
    List {
        #[arg(long)]
        class: Option<i64>,
    },
    /// Change an assignment.
    Update {
        assignment_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an assignment.
    Delete { assignment_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SubmissionCommand {
    /// Upload a document for an assignment.
    Submit { assignment_id: i64, file: PathBuf },
    /// The caller's submissions, optionally narrowed.
    Mine(SubmissionScope),
    /// Assignments the caller has not submitted yet.
    Pending,
    /// Submissions received, for teachers.
    List(SubmissionTarget),
    /// Ungraded submissions of an assignment.
    Ungraded { assignment_id: i64 },
    /// Full submission record.
    Show { submission_id: i64 },
    /// Grade a submission.
    Grade {
        submission_id: i64,
        score: f64,
        report: String,
    },
    /// Grading statistics of an assignment.
    Stats { assignment_id: i64 },
    /// Save the originally uploaded file.
    Download {
        submission_id: i64,
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct SubmissionScope {
    /// Only submissions to this class.
    #[arg(long)]
    pub class: Option<i64>,
    /// Only submissions to this assignment.
    #[arg(long)]
    pub assignment: Option<i64>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SubmissionTarget {
    /// Submissions to an assignment.
    #[arg(long)]
    pub assignment: Option<i64>,
    /// Submissions within a class.
    #[arg(long)]
    pub class: Option<i64>,
    /// Submissions by a student.
    #[arg(long)]
    pub student: Option<i64>,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse::<UserRole>().map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "classroom", "register", "bob", "--role", "student", "--password", "pw",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Register { role: UserRole::Student, .. }
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Cli::try_parse_from([
            "classroom", "register", "bob", "--role", "admin", "--password", "pw",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submission_list_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["classroom", "submissions", "list"]).is_err());
        assert!(
            Cli::try_parse_from([
                "classroom", "submissions", "list", "--class", "1", "--student", "2",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["classroom", "submissions", "list", "--class", "1"]).is_ok()
        );
    }
}
