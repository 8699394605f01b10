//! Active-endpoint resolution over a priority-ordered candidate list.
//!
//! The resolver probes `GET {candidate}/health` front to back and caches the
//! first candidate that answers 2xx. The cache is shared by every clone of the
//! owning [`crate::ApiClient`] and lives for the process; it is cleared only
//! when a request against the cached endpoint fails.
//!
//! The cache sits behind an async mutex that stays locked for a whole probing
//! pass, so concurrent callers that find it empty queue behind the first one
//! and reuse its result instead of probing again.

use std::time::Duration;

use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::error::ClientError;

const HEALTH_PATH: &str = "health";

/// The cached endpoint and whether a probe actually confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEndpoint {
    pub url: String,
    /// `false` when no candidate answered and the first one was adopted as a
    /// last-resort default.
    pub verified: bool,
}

pub struct EndpointResolver {
    http: Client,
    candidates: Vec<String>,
    probe_timeout: Duration,
    active: Mutex<Option<ActiveEndpoint>>,
}

impl EndpointResolver {
    /// Validates and stores the candidate list.
    ///
    /// Each candidate must be an absolute `http` or `https` URL. Trailing
    /// slashes are trimmed. Invalid candidates are dropped with a warning so
    /// one mistyped override does not hide the reachable hosts behind it.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyCandidates`] if `candidates` is empty.
    /// - [`ClientError::InvalidUrl`] for the first rejected candidate when
    ///   none is valid.
    pub fn new(
        http: Client,
        candidates: &[String],
        probe_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let mut valid = Vec::with_capacity(candidates.len());
        let mut first_error = None;
        for raw in candidates {
            match validate_base_url(raw) {
                Ok(url) => valid.push(url),
                Err(e) => {
                    tracing::warn!(
                        candidate = %raw,
                        error = %e,
                        "skipping invalid candidate endpoint"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }
        if valid.is_empty() {
            return Err(first_error.unwrap_or(ClientError::EmptyCandidates));
        }
        Ok(Self {
            http,
            candidates: valid,
            probe_timeout,
            active: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Returns the cached endpoint without probing.
    ///
    /// Shares the lock that a probing pass holds, so while another task is
    /// resolving this waits for that pass to finish: up to one probe timeout
    /// per candidate.
    pub async fn active(&self) -> Option<ActiveEndpoint> {
        self.active.lock().await.clone()
    }

    /// Returns the active endpoint, probing the candidates if none is cached.
    ///
    /// Never fails: when no candidate answers, the first candidate is cached
    /// and returned anyway.
    pub async fn resolve(&self) -> String {
        let mut active = self.active.lock().await;
        if let Some(endpoint) = active.as_ref() {
            return endpoint.url.clone();
        }

        let endpoint = if let Some(url) = self.probe_candidates().await {
            ActiveEndpoint {
                url,
                verified: true,
            }
        } else {
            let url = self.candidates[0].clone();
            tracing::warn!(
                candidates = self.candidates.len(),
                fallback = %url,
                "no candidate endpoint answered its health check; using first candidate"
            );
            ActiveEndpoint {
                url,
                verified: false,
            }
        };
        let url = endpoint.url.clone();
        *active = Some(endpoint);
        url
    }

    /// Like [`resolve`](Self::resolve) but reports total failure instead of
    /// adopting an unverified default.
    ///
    /// An unverified endpoint cached by an earlier `resolve()` is not trusted;
    /// the candidates are probed again.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoReachableEndpoint`] if no candidate answers.
    /// Nothing is cached in that case.
    pub async fn try_resolve(&self) -> Result<String, ClientError> {
        let mut active = self.active.lock().await;
        if let Some(endpoint) = active.as_ref().filter(|e| e.verified) {
            return Ok(endpoint.url.clone());
        }

        match self.probe_candidates().await {
            Some(url) => {
                *active = Some(ActiveEndpoint {
                    url: url.clone(),
                    verified: true,
                });
                Ok(url)
            }
            None => Err(ClientError::NoReachableEndpoint {
                tried: self.candidates.clone(),
            }),
        }
    }

    /// Clears the cache if it still points at `failed`.
    ///
    /// A request that started before another task re-resolved must not evict
    /// the newer endpoint, so this is a no-op when the cache already moved on.
    /// Like [`active`](Self::active), this waits out an in-flight probing pass.
    pub async fn invalidate(&self, failed: &str) {
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(|e| e.url == failed) {
            tracing::info!(endpoint = %failed, "invalidating active endpoint");
            *active = None;
        }
    }

    /// Clears the cache unconditionally.
    pub async fn reset(&self) {
        *self.active.lock().await = None;
    }

    async fn probe_candidates(&self) -> Option<String> {
        for candidate in &self.candidates {
            if self.probe(candidate).await {
                tracing::info!(endpoint = %candidate, "adopted active endpoint");
                return Some(candidate.clone());
            }
        }
        None
    }

    async fn probe(&self, base: &str) -> bool {
        let url = format!("{base}/{HEALTH_PATH}");
        match self
            .http
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(%url, status = response.status().as_u16(), "health probe failed");
                false
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "health probe failed");
                false
            }
        }
    }
}

/// Checks that `raw` is an absolute http(s) URL and returns it without a
/// trailing slash.
pub(crate) fn validate_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: "base URL must not carry a query or fragment".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
