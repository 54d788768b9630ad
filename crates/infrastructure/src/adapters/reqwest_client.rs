//! HTTP transport using reqwest.
//!
//! Wraps a `reqwest::Client` bound to the service base URL, maps transport
//! failures onto [`ClientError`] and decodes the service's JSON and error
//! payloads.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use classroom_domain::ClientSettings;

use crate::error::ClientError;
use crate::serialization::from_json_bytes;

const USER_AGENT: &str = concat!("classroom/", env!("CARGO_PKG_VERSION"));

/// HTTP transport bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl ReqwestClient {
    /// Creates a transport from client settings.
    ///
    /// Every request is bounded by `request_timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let timeout = settings.request_timeout();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Other(e.to_string()))?;

        Self::with_client(client, settings.normalized_base_url(), timeout)
    }

    /// Creates a transport around an existing reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn with_client(
        client: Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// The service base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!("{}{path}", self.base_url);
        Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// Starts a request for an endpoint path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not form a valid URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self.client.request(method, self.url(path)?))
    }

    /// Sends a request, mapping transport failures. Status codes are not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be completed.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        request.send().await.map_err(|e| self.map_error(&e))
    }

    /// Maps reqwest errors to [`ClientError`].
    fn map_error(&self, error: &reqwest::Error) -> ClientError {
        if error.is_timeout() {
            return ClientError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lowered = message.to_lowercase();
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return ClientError::Dns { host, message };
            }
            if lowered.contains("refused") {
                return ClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return ClientError::Connection(message);
        }

        if error.is_decode() {
            return ClientError::Decode(error.to_string());
        }

        ClientError::Other(error.to_string())
    }
}

/// Passes a success response through; turns anything else into
/// [`ClientError::Status`] carrying the payload's `detail`.
///
/// # Errors
///
/// Returns [`ClientError::Status`] for a non-success status.
pub async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable error body still yields the status.
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        detail: extract_detail(&body),
    })
}

/// Checks the status and decodes a JSON body.
///
/// # Errors
///
/// Returns an error for a non-success status or an undecodable body.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = check_status(response)
        .await?
        .bytes()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    from_json_bytes(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pulls the human-readable message out of an error payload.
///
/// Handles `{"detail": "text"}` and validation failures of the form
/// `{"detail": [{"msg": "..."}, ...]}`, whose messages are joined with `; `.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let payload: Value = serde_json::from_str(body).ok()?;
    match payload.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
