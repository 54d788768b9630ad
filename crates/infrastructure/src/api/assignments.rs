//! Assignment endpoints

use reqwest::Method;

use classroom_domain::{Assignment, AssignmentUpdate, NewAssignment};

use super::ClassroomClient;
use crate::error::ClientError;

impl ClassroomClient {
    /// `POST /assignments/`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<Assignment, ClientError> {
        self.send_json(Method::POST, "/assignments/", assignment)
            .await
    }

    /// `GET /assignments/class/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn class_assignments(&self, class_id: i64) -> Result<Vec<Assignment>, ClientError> {
        self.get(&format!("/assignments/class/{class_id}")).await
    }

    /// `GET /assignments/my-assignments`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_assignments(&self) -> Result<Vec<Assignment>, ClientError> {
        self.get("/assignments/my-assignments").await
    }

    /// `PUT /assignments/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn update_assignment(
        &self,
        assignment_id: i64,
        update: &AssignmentUpdate,
    ) -> Result<Assignment, ClientError> {
        self.send_json(Method::PUT, &format!("/assignments/{assignment_id}"), update)
            .await
    }

    /// `DELETE /assignments/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn delete_assignment(&self, assignment_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/assignments/{assignment_id}")).await
    }
}
