//! Application configuration.
//!
//! Aggregates database, output and logging settings into a single Config
//! struct that can be loaded from YAML files or environment variables.

mod logging;
mod storage;

pub use logging::LoggingConfig;
pub use storage::{DatabaseConfig, OutputConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "vendor_summary.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "VENDOR_SUMMARY_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "VENDOR_SUMMARY";
/// Environment variable for logging filter directives.
pub const LOG_ENV_VAR: &str = "VENDOR_SUMMARY_LOG";

use serde::Deserialize;

use crate::error::Result;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inventory database location.
    pub database: DatabaseConfig,
    /// Where the summary is written.
    pub output: OutputConfig,
    /// Log filter and destination.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `vendor_summary.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self> {
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
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        Ok(config)
    }
}
