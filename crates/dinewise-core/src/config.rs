use std::path::Path;

use crate::app_config::{AppConfig, Environment};
use crate::candidates::{build_candidates, builtin_ai_hosts, builtin_api_hosts};
use crate::extra::{load_app_extra, AppExtra};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the app config file named by
/// `DINEWISE_APP_CONFIG` cannot be loaded.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the app config file cannot
/// be loaded.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), load_app_extra)
}

/// Build application configuration from an env-var lookup and an app config
/// loader, so tests can run against a `HashMap` without touching the process
/// environment or the filesystem.
fn build_app_config<F, L>(lookup: F, load_extra: L) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    L: Fn(&Path) -> Result<AppExtra, ConfigError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DINEWISE_ENV", "development"))?;
    let log_level = or_default("DINEWISE_LOG_LEVEL", "info");

    let extra = match lookup("DINEWISE_APP_CONFIG") {
        Ok(path) if !path.trim().is_empty() => load_extra(Path::new(path.trim()))?,
        _ => AppExtra::default(),
    };

    let api_url = lookup("DINEWISE_API_URL").ok();
    let api_candidates = build_candidates(
        &[api_url.as_deref(), extra.api_url.as_deref()],
        &builtin_api_hosts(env),
    );

    let ai_url = lookup("DINEWISE_AI_URL").ok();
    let ai_candidates = build_candidates(
        &[ai_url.as_deref(), extra.ai_url.as_deref()],
        &builtin_ai_hosts(env),
    );

    let probe_timeout_secs = parse_u64("DINEWISE_PROBE_TIMEOUT_SECS", "5")?;
    let request_timeout_secs = parse_u64("DINEWISE_REQUEST_TIMEOUT_SECS", "30")?;
    if probe_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DINEWISE_PROBE_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DINEWISE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("DINEWISE_USER_AGENT", "dinewise/0.1 (api-client)");

    Ok(AppConfig {
        env,
        log_level,
        api_candidates,
        ai_candidates,
        probe_timeout_secs,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DINEWISE_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
