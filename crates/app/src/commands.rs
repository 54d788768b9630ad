//! Command execution.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::json;

use classroom_domain::{
    AssignmentUpdate, ClassUpdate, Grade, NewAssignment, NewClass, NewUser,
};
use classroom_infrastructure::ClassroomClient;

use crate::cli::{
    AssignmentCommand, ClassCommand, ClassFilter, Command, SubmissionCommand, SubmissionScope,
    SubmissionTarget,
};

/// Runs one command, printing its result as JSON on stdout.
pub async fn run(command: Command, client: &ClassroomClient) -> anyhow::Result<()> {
    let session = client.session();
    match command {
        Command::Login { name, password } => {
            print_json(&session.login(&name, &password).await?)
        }
        Command::Register {
            name,
            role,
            password,
        } => {
            let user = NewUser {
                name,
                password,
                role,
            };
            print_json(&session.register(&user).await?)
        }
        Command::Logout => {
            session.logout().await;
            whoami(client).await
        }
        Command::Whoami => whoami(client).await,
        Command::Refresh => {
            if !session.refresh().await {
                bail!("could not refresh the session, log in again");
            }
            whoami(client).await
        }
        Command::Classes(command) => classes(command, client).await,
        Command::Assignments(command) => assignments(command, client).await,
        Command::Submissions(command) => submissions(command, client).await,
    }
}

async fn whoami(client: &ClassroomClient) -> anyhow::Result<()> {
    let status = client.session().status().await;
    print_json(&json!({
        "authenticated": status.is_authenticated(),
        "message": status.display_message(),
        "user": status.user(),
    }))
}

async fn classes(command: ClassCommand, client: &ClassroomClient) -> anyhow::Result<()> {
    match command {
        ClassCommand::Create { name, description } => {
            print_json(&client.create_class(&NewClass { name, description }).await?)
        }
        ClassCommand::Search { term } => print_json(&client.search_classes(&term).await?),
        ClassCommand::Join { class_id } => print_json(&client.join_class(class_id).await?),
        ClassCommand::JoinAsTeacher { class_id } => {
            print_json(&client.join_class_as_teacher(class_id).await?)
        }
        ClassCommand::List(ClassFilter { created, joined }) => {
            let classes = if created {
                client.my_created_classes().await?
            } else if joined {
                client.my_joined_classes().await?
            } else {
                client.my_classes().await?
            };
            print_json(&classes)
        }
        ClassCommand::Roster { class_id } => print_json(&client.class_roster(class_id).await?),
        ClassCommand::Update {
            class_id,
            name,
            description,
        } => {
            let update = ClassUpdate { name, description };
            print_json(&client.update_class(class_id, &update).await?)
        }
        ClassCommand::Delete { class_id } => {
            client.delete_class(class_id).await?;
            print_json(&json!({ "deleted": class_id }))
        }
    }
}

async fn assignments(command: AssignmentCommand, client: &ClassroomClient) -> anyhow::Result<()> {
    match command {
        AssignmentCommand::Create {
            class_id,
            title,
            description,
        } => {
            let assignment = NewAssignment {
                title,
                description,
                class_id,
            };
            print_json(&client.create_assignment(&assignment).await?)
        }
        AssignmentCommand::List { class: Some(id) } => {
            print_json(&client.class_assignments(id).await?)
        }
        AssignmentCommand::List { class: None } => print_json(&client.my_assignments().await?),
        AssignmentCommand::Update {
            assignment_id,
            title,
            description,
        } => {
            let update = AssignmentUpdate { title, description };
            print_json(&client.update_assignment(assignment_id, &update).await?)
        }
        AssignmentCommand::Delete { assignment_id } => {
            client.delete_assignment(assignment_id).await?;
            print_json(&json!({ "deleted": assignment_id }))
        }
    }
}

async fn submissions(command: SubmissionCommand, client: &ClassroomClient) -> anyhow::Result<()> {
    match command {
        SubmissionCommand::Submit {
            assignment_id,
            file,
        } => {
            let file_name = file_name(&file)?;
            let contents = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            print_json(&client.submit(assignment_id, file_name, contents).await?)
        }
        SubmissionCommand::Mine(SubmissionScope { class, assignment }) => {
            let submissions = match (class, assignment) {
                (Some(class_id), _) => client.my_submissions_for_class(class_id).await?,
                (None, Some(assignment_id)) => {
                    client.my_submissions_for_assignment(assignment_id).await?
                }
                (None, None) => client.my_submissions().await?,
            };
            print_json(&submissions)
        }
        SubmissionCommand::Pending => print_json(&client.pending_assignments().await?),
        SubmissionCommand::List(SubmissionTarget {
            assignment,
            class,
            student,
        }) => {
            let submissions = match (assignment, class, student) {
                (Some(id), _, _) => client.assignment_submissions(id).await?,
                (None, Some(id), _) => client.class_submissions(id).await?,
                (None, None, Some(id)) => client.student_submissions(id).await?,
                (None, None, None) => bail!("one of --assignment, --class or --student is required"),
            };
            print_json(&submissions)
        }
        SubmissionCommand::Ungraded { assignment_id } => {
            print_json(&client.ungraded_submissions(assignment_id).await?)
        }
        SubmissionCommand::Show { submission_id } => {
            print_json(&client.submission(submission_id).await?)
        }
        SubmissionCommand::Grade {
            submission_id,
            score,
            report,
        } => {
            let grade = Grade::new(score, report)?;
            print_json(&client.grade_submission(submission_id, &grade).await?)
        }
        SubmissionCommand::Stats { assignment_id } => {
            print_json(&client.assignment_statistics(assignment_id).await?)
        }
        SubmissionCommand::Download {
            submission_id,
            output,
        } => {
            let bytes = client.download_submission(submission_id).await?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("failed to write {}", output.display()))?;
            print_json(&json!({ "saved": output, "bytes": bytes.len() }))
        }
    }
}

fn file_name(path: &Path) -> anyhow::Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of_upload() {
        assert_eq!(file_name(Path::new("/tmp/essay.docx")).unwrap(), "essay.docx");
        assert!(file_name(Path::new("/")).is_err());
    }
}
