//! Submission and grading endpoints

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use classroom_domain::{
    Grade, PendingAssignment, StudentSubmission, SubmissionDetail, SubmissionReceipt,
    SubmissionStatistics, TeacherSubmission,
};

use super::ClassroomClient;
use crate::adapters::{check_status, decode_json};
use crate::error::ClientError;

impl ClassroomClient {
    /// `POST /submissions/` as multipart `assignment_id` + `file`.
    ///
    /// The part's content type is guessed from `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn submit(
        &self,
        assignment_id: i64,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<SubmissionReceipt, ClientError> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let file = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())
            .map_err(|e| ClientError::Other(e.to_string()))?;
        let form = Form::new()
            .text("assignment_id", assignment_id.to_string())
            .part("file", file);

        let response = self
            .dispatch(Method::POST, "/submissions/", |r| r.multipart(form))
            .await?;
        decode_json(response).await
    }

    /// `GET /submissions/my-submissions`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_submissions(&self) -> Result<Vec<StudentSubmission>, ClientError> {
        self.get("/submissions/my-submissions").await
    }

    /// `GET /submissions/my-submissions/class/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_submissions_for_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<StudentSubmission>, ClientError> {
        self.get(&format!("/submissions/my-submissions/class/{class_id}"))
            .await
    }

    /// `GET /submissions/my-submissions/assignment/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<StudentSubmission>, ClientError> {
        self.get(&format!(
            "/submissions/my-submissions/assignment/{assignment_id}"
        ))
        .await
    }

    /// `GET /submissions/my-submissions/pending`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn pending_assignments(&self) -> Result<Vec<PendingAssignment>, ClientError> {
        self.get("/submissions/my-submissions/pending").await
    }

    /// `GET /submissions/assignment/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<TeacherSubmission>, ClientError> {
        self.get(&format!("/submissions/assignment/{assignment_id}"))
            .await
    }

    /// `GET /submissions/class/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn class_submissions(
        &self,
        class_id: i64,
    ) -> Result<Vec<TeacherSubmission>, ClientError> {
        self.get(&format!("/submissions/class/{class_id}")).await
    }

    /// `GET /submissions/student/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn student_submissions(
        &self,
        student_id: i64,
    ) -> Result<Vec<TeacherSubmission>, ClientError> {
        self.get(&format!("/submissions/student/{student_id}")).await
    }

    /// `GET /submissions/assignment/{id}/ungraded`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn ungraded_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<TeacherSubmission>, ClientError> {
        self.get(&format!("/submissions/assignment/{assignment_id}/ungraded"))
            .await
    }

    /// `GET /submissions/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn submission(&self, submission_id: i64) -> Result<SubmissionDetail, ClientError> {
        self.get(&format!("/submissions/{submission_id}")).await
    }

    /// `PUT /submissions/{id}/grade`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        grade: &Grade,
    ) -> Result<SubmissionDetail, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/submissions/{submission_id}/grade"),
            grade,
        )
        .await
    }

    /// `GET /submissions/assignment/{id}/statistics`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn assignment_statistics(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionStatistics, ClientError> {
        self.get(&format!("/submissions/assignment/{assignment_id}/statistics"))
            .await
    }

    /// `GET /submissions/{id}/download`, returning the originally uploaded file.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn download_submission(&self, submission_id: i64) -> Result<Vec<u8>, ClientError> {
        let response = self
            .dispatch(
                Method::GET,
                &format!("/submissions/{submission_id}/download"),
                |r| r,
            )
            .await?;
        let bytes = check_status(response)
            .await?
            .bytes()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use crate::api::test_support::logged_in_client;
    use classroom_domain::Grade;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn detail_json(score: Option<f64>) -> serde_json::Value {
        json!({
            "id": 11,
            "student_name": "bob",
            "assignment_title": "Essay",
            "class_id": 3,
            "class_name": "Physics",
            "file_json": {"paragraphs": ["Intro"]},
            "report": score.map(|_| "Well argued"),
            "score": score,
            "submitted_at": "2025-03-03T09:00:00",
            "graded_at": score.map(|_| "2025-03-04T09:00:00"),
            "is_graded": score.is_some()
        })
    }

    #[tokio::test]
    async fn test_submit_uploads_multipart_form() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/submissions/")
                .header("authorization", "Bearer tok-1")
                .body_contains("name=\"assignment_id\"")
                .body_contains("filename=\"essay.docx\"")
                .body_contains("essay body");
            then.status(200).json_body(json!({
                "id": 11,
                "assignment_title": "Essay",
                "submitted_at": "2025-03-03T09:00:00",
                "message": "Submitted"
            }));
        });

        let receipt = client
            .submit(7, "essay.docx", b"essay body".to_vec())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(receipt.id, 11);
    }

    #[tokio::test]
    async fn test_grade_submission() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/submissions/11/grade")
                .json_body(json!({"score": 92.5, "report": "Well argued"}));
            then.status(200).json_body(detail_json(Some(92.5)));
        });

        let graded = client
            .grade_submission(11, &Grade::new(92.5, "Well argued").unwrap())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(graded.score, Some(92.5));
        assert!(graded.graded_at.is_some());
    }

    #[tokio::test]
    async fn test_ungraded_detail_has_no_grading_time() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/submissions/11");
            then.status(200).json_body(detail_json(None));
        });

        let detail = client.submission(11).await.unwrap();

        assert_eq!(detail.score, None);
        assert_eq!(detail.graded_at, None);
        assert!(detail.file_json.is_some());
    }

    #[tokio::test]
    async fn test_download_returns_raw_bytes() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/submissions/11/download");
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body([0x50_u8, 0x4b, 0x03, 0x04]);
        });

        let bytes = client.download_submission(11).await.unwrap();

        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn test_statistics_and_pending() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/submissions/assignment/7/statistics");
            then.status(200).json_body(json!({
                "total_submissions": 3,
                "graded_submissions": 2,
                "ungraded_submissions": 1,
                "average_score": 81.0,
                "highest_score": 92.5,
                "lowest_score": 69.5
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/submissions/my-submissions/pending");
            then.status(200).json_body(json!([{
                "id": 8,
                "title": "Lab",
                "description": null,
                "class_id": 3,
                "class_name": "Physics",
                "teacher_name": "alice",
                "created_at": "2025-03-01T10:00:00",
                "deadline": null
            }]));
        });

        let stats = client.assignment_statistics(7).await.unwrap();
        assert_eq!(stats.ungraded_submissions, 1);
        assert_eq!(stats.highest_score, Some(92.5));

        let pending = client.pending_assignments().await.unwrap();
        assert_eq!(pending[0].deadline, None);
    }
}
