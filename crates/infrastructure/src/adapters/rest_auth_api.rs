//! Auth endpoints over HTTP.
//!
//! Calls are made with an explicit bearer credential and bypass the request
//! gateway; the session manager is the only caller.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use classroom_application::ports::{AuthApi, AuthApiError};
use classroom_domain::{LogoutReceipt, NewUser, TokenGrant, UserRecord};

use super::reqwest_client::{ReqwestClient, decode_json};
use crate::error::ClientError;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// [`AuthApi`] implementation against the classroom service.
#[derive(Debug, Clone)]
pub struct RestAuthApi {
    transport: ReqwestClient,
}

impl RestAuthApi {
    /// Creates the adapter over a transport.
    #[must_use]
    pub const fn new(transport: ReqwestClient) -> Self {
        Self { transport }
    }

    async fn bearer_post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        credential: &str,
    ) -> Result<T, ClientError> {
        let request = self
            .transport
            .request(Method::POST, path)?
            .bearer_auth(credential);
        decode_json(self.transport.send(request).await?).await
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn register(&self, user: &NewUser) -> Result<UserRecord, AuthApiError> {
        debug!(name = %user.name, role = %user.role, "registering account");
        let request = self
            .transport
            .request(Method::POST, "/auth/register")?
            .json(user);
        Ok(decode_json(self.transport.send(request).await?).await?)
    }

    async fn login(&self, name: &str, password: &str) -> Result<TokenGrant, AuthApiError> {
        let body = serde_urlencoded::to_string([("username", name), ("password", password)])
            .map_err(|e| AuthApiError::InvalidResponse(e.to_string()))?;
        let request = self
            .transport
            .request(Method::POST, "/auth/login")?
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        Ok(decode_json(self.transport.send(request).await?).await?)
    }

    async fn current_user(&self, credential: &str) -> Result<UserRecord, AuthApiError> {
        let request = self
            .transport
            .request(Method::GET, "/auth/dashboard")?
            .bearer_auth(credential);
        Ok(decode_json(self.transport.send(request).await?).await?)
    }

    async fn refresh(&self, credential: &str) -> Result<TokenGrant, AuthApiError> {
        Ok(self.bearer_post("/auth/refresh", credential).await?)
    }

    async fn logout(&self, credential: &str) -> Result<LogoutReceipt, AuthApiError> {
        Ok(self.bearer_post("/auth/logout", credential).await?)
    }
}
