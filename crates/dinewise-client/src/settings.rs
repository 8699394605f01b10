use std::time::Duration;

use dinewise_core::AppConfig;

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = "dinewise/0.1 (api-client)";

/// Construction parameters for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URLs in probe order, highest priority first.
    pub candidates: Vec<String>,
    /// Upper bound for each `GET /health` probe.
    pub probe_timeout: Duration,
    /// Upper bound for each API request attempt.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ClientSettings {
    /// Settings with default timeouts for the given candidate list.
    #[must_use]
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Settings for the restaurant/events backend.
    #[must_use]
    pub fn backend(config: &AppConfig) -> Self {
        Self::from_app_config(config, config.api_candidates.clone())
    }

    /// Settings for the recommendation assistant service.
    #[must_use]
    pub fn assistant(config: &AppConfig) -> Self {
        Self::from_app_config(config, config.ai_candidates.clone())
    }

    fn from_app_config(config: &AppConfig, candidates: Vec<String>) -> Self {
        Self {
            candidates,
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }

    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
