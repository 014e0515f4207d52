//! Bootstrap utilities for the vendor-summary binary.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingConfig, LOG_ENV_VAR};
use crate::error::{Result, SummaryError};

/// Initialize tracing from the logging config.
///
/// `VENDOR_SUMMARY_LOG` overrides `logging.level`. When `logging.file` is
/// set, its directory is created and the file is truncated, so each run
/// starts a fresh log.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.level))
        .map_err(|e| SummaryError::Logging(format!("invalid filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.file_path() {
        Some(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .try_init()
                .map_err(|e| SummaryError::Logging(e.to_string()))
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| SummaryError::Logging(e.to_string())),
    }
}

/// Create the log file's directory and open the file truncated.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
