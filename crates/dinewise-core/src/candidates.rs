//! Priority-ordered candidate base URLs.
//!
//! Order is significant: the resolver probes front to back and adopts the
//! first reachable entry, falling back to the first entry when none answers.

use crate::app_config::Environment;

/// Primary production backend.
pub const API_PRODUCTION_HOST: &str = "https://api.dinewise.app";

/// Known alternate host/port combinations for the backend, used when HTTPS
/// termination is unavailable on the network the client is on.
pub const API_ALTERNATE_HOSTS: &[&str] = &[
    "http://api.dinewise.app:5298",
    "http://api.dinewise.app:8080",
];

/// Local-development fallbacks. `10.0.2.2` is the host loopback as seen from
/// the Android emulator.
pub const API_LOCAL_HOSTS: &[&str] = &[
    "http://localhost:5298",
    "http://127.0.0.1:5298",
    "http://10.0.2.2:5298",
];

/// Public recommendation assistant host.
pub const AI_PRODUCTION_HOST: &str = "https://ai.dinewise.app";

/// Recommendation assistant hosts after any configured override.
pub const AI_FALLBACK_HOSTS: &[&str] = &[
    AI_PRODUCTION_HOST,
    "http://localhost:5001",
    "http://127.0.0.1:5001",
];

/// Assemble a candidate list from configured overrides followed by built-in
/// hosts.
///
/// Overrides come first in the order given (`None` and blank entries are
/// skipped). Trailing slashes are trimmed and exact duplicates are dropped,
/// keeping the highest-priority occurrence.
#[must_use]
pub fn build_candidates(overrides: &[Option<&str>], builtin: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(overrides.len() + builtin.len());
    let configured = overrides.iter().filter_map(|o| *o);
    for raw in configured.chain(builtin.iter().copied()) {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() || out.iter().any(|existing| existing == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// Built-in backend hosts in priority order: production, alternates, local.
///
/// Production builds never probe the loopback/emulator hosts.
pub(crate) fn builtin_api_hosts(env: Environment) -> Vec<&'static str> {
    let local: &[&str] = if env.allows_local_hosts() {
        API_LOCAL_HOSTS
    } else {
        &[]
    };
    std::iter::once(API_PRODUCTION_HOST)
        .chain(API_ALTERNATE_HOSTS.iter().copied())
        .chain(local.iter().copied())
        .collect()
}

/// Built-in assistant hosts; only the public one in production.
pub(crate) fn builtin_ai_hosts(env: Environment) -> Vec<&'static str> {
    if env.allows_local_hosts() {
        AI_FALLBACK_HOSTS.to_vec()
    } else {
        vec![AI_PRODUCTION_HOST]
    }
}
