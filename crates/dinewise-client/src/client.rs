//! HTTP client for the dinewise backend.
//!
//! Wraps `reqwest` with endpoint resolution and single failover. All verbs go
//! through [`ApiClient::request`], which resolves the active base URL, sends
//! the call, and on an endpoint-level failure re-resolves and retries once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::failover::with_failover;
use crate::resolver::{ActiveEndpoint, EndpointResolver};
use crate::settings::ClientSettings;

/// Client for the dinewise REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the active
/// endpoint cache.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    resolver: Arc<EndpointResolver>,
    request_timeout: Duration,
}

impl ApiClient {
    /// Creates a client over the candidate list in `settings`.
    ///
    /// No network I/O happens here; the first request (or an explicit
    /// [`resolve`](Self::resolve)) triggers probing.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`ClientError::EmptyCandidates`] or [`ClientError::InvalidUrl`] if
    ///   the candidate list is unusable.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.probe_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        let resolver = EndpointResolver::new(
            http.clone(),
            &settings.candidates,
            settings.probe_timeout,
        )?;
        Ok(Self {
            http,
            resolver: Arc::new(resolver),
            request_timeout: settings.request_timeout,
        })
    }

    #[must_use]
    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Returns the active base URL, probing candidates on first use.
    ///
    /// Falls back to the first candidate when none is reachable.
    pub async fn resolve(&self) -> String {
        self.resolver.resolve().await
    }

    /// Returns the active base URL or an error when no candidate is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoReachableEndpoint`] if every probe fails.
    pub async fn try_resolve(&self) -> Result<String, ClientError> {
        self.resolver.try_resolve().await
    }

    pub async fn active_endpoint(&self) -> Option<ActiveEndpoint> {
        self.resolver.active().await
    }

    /// Sends `method path` with an optional JSON body and returns the parsed
    /// JSON response.
    ///
    /// An empty 2xx body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure, after one failover. A
    ///   `path` that does not form a valid URL also lands here, unretried.
    /// - [`ClientError::Status`] on a non-2xx response (5xx, 408 and 429 after
    ///   one failover; other statuses immediately).
    /// - [`ClientError::Deserialize`] if a 2xx body is not valid JSON (never
    ///   retried).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        with_failover(&self.resolver, |base| {
            let method = method.clone();
            async move { self.send(&base, method, path, body).await }
        })
        .await
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    /// `POST path` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// [`ClientError::Serialize`] if `body` cannot be encoded (no request is
    /// sent), otherwise see [`request`](Self::request).
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        let body = encode_body(body)?;
        self.request(Method::POST, path, body.as_ref()).await
    }

    /// `PUT path` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        let body = encode_body(body)?;
        self.request(Method::PUT, path, body.as_ref()).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    /// One attempt against `base`.
    async fn send(
        &self,
        base: &str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = join_url(base, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, &url)
            .timeout(self.request_timeout)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Deserialize {
            context: url,
            source: e,
        })
    }
}

fn encode_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Option<Value>, ClientError> {
    body.map(serde_json::to_value)
        .transpose()
        .map_err(ClientError::Serialize)
}

/// Joins a base URL (no trailing slash) and an API path.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
