//! Resolved configuration values

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the CLI needs to open a board store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadboardConfig {
    /// Root directory holding organizations and the activity log
    pub data_dir: PathBuf,
    /// Attributed in activity entries; `None` leaves entries anonymous
    pub actor: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Send `expected_version` with placement commits
    pub reject_stale_commits: bool,
}

impl Default for LeadboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            actor: None,
            log_filter: "warn".to_string(),
            reject_stale_commits: false,
        }
    }
}

impl LeadboardConfig {
    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("data_dir", "must not be empty"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::invalid_value("log_filter", "must not be empty"));
        }
        if self.actor.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(ConfigError::invalid_value("actor", "must not be blank"));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("leadboard"))
        .unwrap_or_else(|| PathBuf::from(".leadboard"))
}
