//! Classroom resource APIs.
//!
//! One method per REST endpoint, split across files by resource. Every call
//! goes through the [`RequestGateway`]: the credential is refreshed when due
//! and attached, and a 401 answer clears the session.

mod assignments;
mod classes;
mod submissions;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use classroom_application::{RequestGateway, SessionHandle};

use crate::adapters::{ReqwestClient, check_status, decode_json};
use crate::error::ClientError;

/// Client for the class, assignment and submission endpoints.
#[derive(Debug, Clone)]
pub struct ClassroomClient {
    transport: ReqwestClient,
    gateway: RequestGateway,
}

impl ClassroomClient {
    /// Creates a client sending through `transport` on behalf of `session`.
    #[must_use]
    pub const fn new(transport: ReqwestClient, session: SessionHandle) -> Self {
        Self {
            transport,
            gateway: RequestGateway::new(session),
        }
    }

    /// The session requests are authorized with.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        self.gateway.session()
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ClientError> {
        let mut request = self.transport.request(method.clone(), path)?;
        if let Some(credential) = self.gateway.before_dispatch().await {
            request = request.bearer_auth(credential);
        }

        debug!(%method, path, "dispatching request");
        let response = self.transport.send(body(request)).await?;
        let status = response.status().as_u16();
        debug!(%method, path, status, "response received");

        self.gateway.after_receipt(status, path).await;
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        decode_json(self.dispatch(Method::GET, path, |r| r).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode_json(self.dispatch(method, path, |r| r.json(payload)).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        check_status(self.dispatch(Method::DELETE, path, |r| r).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use classroom_application::SessionManager;
    use classroom_application::ports::MemoryStore;
    use classroom_domain::ClientSettings;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::ClassroomClient;
    use crate::adapters::{ReqwestClient, RestAuthApi, SystemClock};

    /// Builds a client against `server` and logs in as `alice`, whose
    /// credential is `tok-1`.
    pub async fn logged_in_client(server: &MockServer) -> ClassroomClient {
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "token_type": "bearer"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/auth/dashboard");
            then.status(200)
                .json_body(json!({"id": 1, "name": "alice", "role": "teacher"}));
        });

        let settings = ClientSettings {
            api_base_url: server.base_url(),
            ..ClientSettings::default()
        };
        let transport = ReqwestClient::new(&settings).unwrap();
        let session = SessionManager::new(
            Arc::new(RestAuthApi::new(transport.clone())),
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock::new()),
            (&settings).into(),
        )
        .spawn();
        session.login("alice", "secret").await.unwrap();

        ClassroomClient::new(transport, session)
    }
}
