//! Optional YAML app config carrying deploy-time "extra" settings.
//!
//! ```yaml
//! extra:
//!   api_url: https://staging.dinewise.app
//!   ai_url: http://10.0.0.7:5001
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppExtra {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub ai_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppExtraFile {
    #[serde(default)]
    pub extra: AppExtra,
}

/// Load the `extra` block from a YAML app config file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_app_extra(path: &Path) -> Result<AppExtra, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AppConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_app_extra(&content)
}

pub(crate) fn parse_app_extra(content: &str) -> Result<AppExtra, ConfigError> {
    if content.trim().is_empty() {
        return Ok(AppExtra::default());
    }
    let file: AppExtraFile = serde_yaml::from_str(content)?;
    Ok(file.extra)
}
