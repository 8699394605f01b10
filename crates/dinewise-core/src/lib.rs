//! Shared configuration for the dinewise workspace.
//!
//! Owns the environment-driven [`AppConfig`] and the priority-ordered
//! candidate endpoint lists the API client probes.

mod app_config;
mod candidates;
mod config;
mod extra;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use candidates::{
    build_candidates, AI_FALLBACK_HOSTS, AI_PRODUCTION_HOST, API_ALTERNATE_HOSTS, API_LOCAL_HOSTS,
    API_PRODUCTION_HOST,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use extra::{load_app_extra, AppExtra, AppExtraFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read app config {path}: {source}")]
    AppConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse app config: {0}")]
    AppConfigParse(#[from] serde_yaml::Error),
}
