//! Configuration provider using Figment

use crate::error::ConfigResult;
use crate::types::LeadboardConfig;
use figment::{
    providers::{Data, Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix for environment overrides, e.g. `LEADBOARD_DATA_DIR`
pub const ENV_PREFIX: &str = "LEADBOARD_";

/// Global file, relative to the home directory
pub const GLOBAL_CONFIG_FILE: &str = ".config/leadboard/config.toml";

/// Project file, relative to the working directory
pub const PROJECT_CONFIG_FILE: &str = "leadboard.toml";

/// Loads [`LeadboardConfig`] from defaults, files and the environment.
///
/// Nothing is cached; every `load` reads the sources again. Missing files are
/// skipped.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    global_file: Option<PathBuf>,
    project_file: PathBuf,
}

impl ConfigProvider {
    /// Provider reading the standard global and project locations
    pub fn new() -> Self {
        let global_file = dirs::home_dir().map(|home| home.join(GLOBAL_CONFIG_FILE));
        if global_file.is_none() {
            debug!("no home directory; skipping global configuration");
        }
        Self {
            global_file,
            project_file: PathBuf::from(PROJECT_CONFIG_FILE),
        }
    }

    /// Replace the global file location
    pub fn with_global_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_file = Some(path.into());
        self
    }

    /// Replace the project file location
    pub fn with_project_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_file = path.into();
        self
    }

    /// Merge all sources and extract a validated configuration
    pub fn load(&self) -> ConfigResult<LeadboardConfig> {
        debug!("Loading leadboard configuration");

        let config: LeadboardConfig = self.build_figment().extract()?;
        config.validate()?;

        debug!(
            data_dir = %config.data_dir.display(),
            reject_stale_commits = config.reject_stale_commits,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Sources in precedence order, later ones overriding earlier ones
    fn build_figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(LeadboardConfig::default()));

        if let Some(global) = &self.global_file {
            figment = figment.merge(Self::load_file(global));
        }

        figment
            .merge(Self::load_file(&self.project_file))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    fn load_file(path: &Path) -> Data<Toml> {
        trace!("Loading config file: {}", path.display());
        Toml::file(path)
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated(temp_dir: &TempDir) -> ConfigProvider {
        ConfigProvider::new()
            .with_global_file(temp_dir.path().join("global.toml"))
            .with_project_file(temp_dir.path().join("leadboard.toml"))
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = isolated(&temp_dir).load().unwrap();
        assert_eq!(config, LeadboardConfig::default());
    }

    #[test]
    #[serial]
    fn test_project_file_overrides_global() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("global.toml"),
            r#"
data_dir = "/srv/global"
actor = "global@acme.test"
"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("leadboard.toml"),
            r#"
data_dir = "/srv/project"
reject_stale_commits = true
"#,
        )
        .unwrap();

        let config = isolated(&temp_dir).load().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/project"));
        assert_eq!(config.actor.as_deref(), Some("global@acme.test"));
        assert!(config.reject_stale_commits);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("leadboard.toml"),
            "log_filter = \"info\"\n",
        )
        .unwrap();

        std::env::set_var("LEADBOARD_LOG_FILTER", "leadboard_kanban=trace");
        std::env::set_var("LEADBOARD_REJECT_STALE_COMMITS", "true");

        let result = isolated(&temp_dir).load();

        std::env::remove_var("LEADBOARD_LOG_FILTER");
        std::env::remove_var("LEADBOARD_REJECT_STALE_COMMITS");

        let config = result.unwrap();
        assert_eq!(config.log_filter, "leadboard_kanban=trace");
        assert!(config.reject_stale_commits);
    }

    #[test]
    #[serial]
    fn test_wrong_type_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("leadboard.toml"),
            "reject_stale_commits = \"sometimes\"\n",
        )
        .unwrap();

        let result = isolated(&temp_dir).load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    #[serial]
    fn test_blank_filter_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("leadboard.toml"), "log_filter = \"\"\n").unwrap();

        let result = isolated(&temp_dir).load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
