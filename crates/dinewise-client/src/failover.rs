//! Single re-resolution and retry when the active endpoint looks broken.
//!
//! [`with_failover`] runs an operation against the active endpoint. If it
//! fails with an endpoint-level error, the endpoint is invalidated, resolved
//! again, and the operation runs once more against whatever the resolver picks.
//! There is no back-off and no third attempt: the retry's result, success or
//! error, is final.

use std::future::Future;

use crate::error::ClientError;
use crate::resolver::EndpointResolver;

/// Returns `true` for errors that say "this endpoint is bad" rather than
/// "this request is bad".
///
/// **Failover:**
/// - [`ClientError::Http`]: connect, timeout, DNS, reset or body-read failure.
/// - [`ClientError::Status`] with 5xx, 408 or 429.
///
/// **Returned as-is:**
/// - Other 4xx statuses: the server understood and refused; another host
///   would answer the same.
/// - [`ClientError::Deserialize`]: the payload is broken, not the connection.
/// - [`ClientError::Serialize`], [`ClientError::InvalidUrl`]: local problems.
pub(crate) fn is_endpoint_failure(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => !e.is_builder(),
        ClientError::Status { status, .. } => *status >= 500 || matches!(*status, 408 | 429),
        ClientError::Deserialize { .. }
        | ClientError::Serialize(_)
        | ClientError::InvalidUrl { .. }
        | ClientError::NoReachableEndpoint { .. }
        | ClientError::EmptyCandidates => false,
    }
}

/// Runs `operation` with the active base URL, failing over at most once.
///
/// `operation` receives the base URL to use. It is called once, or twice when
/// the first call returns an error for which [`is_endpoint_failure`] holds.
pub(crate) async fn with_failover<T, F, Fut>(
    resolver: &EndpointResolver,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let base = resolver.resolve().await;
    match operation(base.clone()).await {
        Ok(value) => Ok(value),
        Err(err) if is_endpoint_failure(&err) => {
            tracing::warn!(
                endpoint = %base,
                error = %err,
                "request failed against active endpoint; re-resolving and retrying once"
            );
            resolver.invalidate(&base).await;
            let retry_base = resolver.resolve().await;
            operation(retry_base).await
        }
        Err(err) => Err(err),
    }
}
