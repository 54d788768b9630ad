//! Class endpoints

use reqwest::Method;
use serde_json::Value;

use classroom_domain::{
    ClassRoster, ClassSearch, ClassSummary, ClassUpdate, Enrollment, JoinClass, NewClass,
};

use super::ClassroomClient;
use crate::error::ClientError;

impl ClassroomClient {
    /// `POST /classes/`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn create_class(&self, class: &NewClass) -> Result<ClassSummary, ClientError> {
        self.send_json(Method::POST, "/classes/", class).await
    }

    /// `POST /classes/search`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn search_classes(&self, term: &str) -> Result<Vec<ClassSummary>, ClientError> {
        let search = ClassSearch {
            search_term: term.to_string(),
        };
        self.send_json(Method::POST, "/classes/search", &search).await
    }

    /// `POST /classes/join`, enrolling the caller as a student.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn join_class(&self, class_id: i64) -> Result<Enrollment, ClientError> {
        self.send_json(Method::POST, "/classes/join", &JoinClass { class_id })
            .await
    }

    /// `POST /classes/join-as-teacher`, joining as an assistant teacher.
    ///
    /// The service's acknowledgement is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn join_class_as_teacher(&self, class_id: i64) -> Result<Value, ClientError> {
        self.send_json(Method::POST, "/classes/join-as-teacher", &JoinClass { class_id })
            .await
    }

    /// `GET /classes/my-classes`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_classes(&self) -> Result<Vec<ClassSummary>, ClientError> {
        self.get("/classes/my-classes").await
    }

    /// `GET /classes/my-created-classes`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_created_classes(&self) -> Result<Vec<ClassSummary>, ClientError> {
        self.get("/classes/my-created-classes").await
    }

    /// `GET /classes/my-joined-classes`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn my_joined_classes(&self) -> Result<Vec<ClassSummary>, ClientError> {
        self.get("/classes/my-joined-classes").await
    }

    /// `GET /classes/{id}/students`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn class_roster(&self, class_id: i64) -> Result<ClassRoster, ClientError> {
        self.get(&format!("/classes/{class_id}/students")).await
    }

    /// `PUT /classes/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn update_class(
        &self,
        class_id: i64,
        update: &ClassUpdate,
    ) -> Result<ClassSummary, ClientError> {
        self.send_json(Method::PUT, &format!("/classes/{class_id}"), update)
            .await
    }

    /// `DELETE /classes/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn delete_class(&self, class_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/classes/{class_id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use crate::api::test_support::logged_in_client;
    use crate::error::ClientError;
    use classroom_domain::{ClassRole, NewClass};
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn class_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Physics",
            "class_code": "PHY-01",
            "description": null,
            "teacher_id": 1,
            "teacher_name": "alice",
            "created_at": "2025-03-01T10:00:00",
            "updated_at": "2025-03-01T10:00:00",
            "student_count": 0,
            "my_role": "main_teacher"
        })
    }

    #[tokio::test]
    async fn test_create_class_attaches_bearer_credential() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/classes/")
                .header("authorization", "Bearer tok-1")
                .json_body(json!({"name": "Physics"}));
            then.status(200).json_body(class_json(3));
        });

        let class = client
            .create_class(&NewClass {
                name: "Physics".to_string(),
                description: None,
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(class.id, 3);
        assert_eq!(class.my_role, ClassRole::MainTeacher);
    }

    #[tokio::test]
    async fn test_listing_and_search() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/classes/my-classes");
            then.status(200).json_body(json!([class_json(1), class_json(2)]));
        });
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/classes/search")
                .json_body(json!({"search_term": "PHY"}));
            then.status(200).json_body(json!([class_json(1)]));
        });

        assert_eq!(client.my_classes().await.unwrap().len(), 2);
        assert_eq!(client.search_classes("PHY").await.unwrap().len(), 1);
        search.assert();
    }

    #[tokio::test]
    async fn test_unauthorized_response_clears_session() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(DELETE).path("/classes/3");
            then.status(401)
                .json_body(json!({"detail": "Could not validate credentials"}));
        });

        let err = client.delete_class(3).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some("Could not validate credentials"));
        assert_eq!(client.session().current_credential().await, None);
    }

    #[tokio::test]
    async fn test_forbidden_response_keeps_session() {
        let server = MockServer::start_async().await;
        let client = logged_in_client(&server).await;
        server.mock(|when, then| {
            when.method(GET).path("/classes/3/students");
            then.status(403)
                .json_body(json!({"detail": "Not a teacher of this class"}));
        });

        let err = client.class_roster(3).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Status {
                status: 403,
                detail: Some("Not a teacher of this class".to_string()),
            }
        );
        assert_eq!(
            client.session().current_credential().await.as_deref(),
            Some("tok-1")
        );
    }
}
