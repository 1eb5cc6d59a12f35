//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

mod app;
mod harness;

pub use app::AppConfig;
pub use harness::{HarnessConfig, ReportConfig, ReportFormat};

use serde::Deserialize;

use crate::feeds::FeedError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "feedspec.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "FEEDSPEC_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "FEEDSPEC";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "FEEDSPEC_LOG";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid feed catalog: {0}")]
    Feeds(#[from] FeedError),
}

/// Main configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Phase deadlines and case selection.
    pub harness: HarnessConfig,
    /// Simulated feed reader.
    pub app: AppConfig,
    /// Report output.
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `feedspec.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every run fail or hang.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.harness.phase_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "harness.phase_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.app.entries_per_feed == 0 {
            return Err(ConfigError::Invalid(
                "app.entries_per_feed must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self {
            app: AppConfig {
                load_latency_ms: 1,
                ..AppConfig::default()
            },
            ..Self::default()
        }
    }
}
