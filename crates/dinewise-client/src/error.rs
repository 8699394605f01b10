use thiserror::Error;

/// Errors returned by the dinewise API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client (timeout, DNS,
    /// connection refused or reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON.
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A candidate base URL or request path did not form a valid URL.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No candidate answered its health probe.
    #[error("no reachable endpoint among {} candidates", .tried.len())]
    NoReachableEndpoint { tried: Vec<String> },

    /// The client was built with an empty candidate list.
    #[error("candidate endpoint list is empty")]
    EmptyCandidates,
}
