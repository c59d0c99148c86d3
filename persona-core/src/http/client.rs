//! HTTP client implementation using reqwest

use crate::http::error::map_status_error;
use crate::providers::error::BackendError;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Default user agent
const USER_AGENT: &str = concat!("persona/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with connection pooling
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default timeouts: 10 s to connect,
    /// 60 s per request. The request timeout is the single temporal bound
    /// on a backend call.
    pub fn new() -> Result<Self, BackendError> {
        Self::with_config(Duration::from_secs(10), Duration::from_secs(60))
    }

    /// Create a new HTTP client with custom timeouts
    pub fn with_config(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| BackendError::Unavailable {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Transport failures map to `Unavailable`; non-success statuses go
    /// through [`map_status_error`]; an undecodable 2xx body is
    /// `InvalidResponse`.
    pub async fn post_json<B, R>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &B,
    ) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%url, %request_id, "sending backend request");

        let mut builder = self.client.post(url).json(body);
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = builder.header("X-Request-ID", request_id.to_string());

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(%url, %request_id, "backend request timed out");
                BackendError::Unavailable {
                    message: format!("request timed out [request_id: {request_id}]"),
                }
            } else if e.is_connect() {
                error!(%url, %request_id, "backend connection failed: {e}");
                BackendError::Unavailable {
                    message: format!("connection failed: {e} [request_id: {request_id}]"),
                }
            } else {
                error!(%url, %request_id, "backend request failed: {e}");
                BackendError::Unavailable {
                    message: format!("{e} [request_id: {request_id}]"),
                }
            }
        })?;

        let status = response.status();
        debug!(%status, %request_id, "backend responded");

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.ok();
            warn!(%status, %request_id, "backend request failed");
            return Err(map_status_error(status, &headers, body, request_id));
        }

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Unavailable {
                message: format!("failed to read response body: {e} [request_id: {request_id}]"),
            })?;

        serde_json::from_str(&text).map_err(|e| {
            error!(%request_id, "undecodable backend response: {e}");
            BackendError::InvalidResponse {
                message: format!("undecodable response: {e} [request_id: {request_id}]"),
            }
        })
    }
}
