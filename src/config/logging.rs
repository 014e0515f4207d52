//! Logging configuration types.

use std::path::Path;

use serde::Deserialize;

/// Log filter and destination.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `VENDOR_SUMMARY_LOG` is unset.
    pub level: String,
    /// Log file, truncated at the start of every run.
    /// Empty means log to stderr.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "logs/get_vendor_summary.log".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Log file path, or `None` when logging to stderr.
    pub fn file_path(&self) -> Option<&Path> {
        if self.file.trim().is_empty() {
            None
        } else {
            Some(Path::new(&self.file))
        }
    }
}
