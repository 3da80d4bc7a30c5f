//! Leadboard configuration using figment
//!
//! Settings are merged from these sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. Global file: `~/.config/leadboard/config.toml`
//! 3. Project file: `./leadboard.toml`
//! 4. Environment variables prefixed with `LEADBOARD_`
//!
//! ```no_run
//! use leadboard_config::ConfigProvider;
//!
//! let config = ConfigProvider::new().load()?;
//! println!("storing boards in {}", config.data_dir.display());
//! # Ok::<(), leadboard_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! data_dir = "/var/lib/leadboard"
//! actor = "ops@acme.test"
//! log_filter = "leadboard_kanban=debug"
//! reject_stale_commits = true
//! ```

mod error;
mod provider;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX, GLOBAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use types::LeadboardConfig;
