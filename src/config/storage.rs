//! Database and output table configuration types.

use serde::Deserialize;

/// Inventory database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, relative to the working directory.
    pub path: String,
    /// Create the database file when it does not exist.
    /// The job normally runs against an existing inventory database,
    /// so a missing file is an error unless this is set.
    /// Default: false
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "inventory.db".to_string(),
            create_if_missing: false,
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for this database.
    pub fn url(&self) -> String {
        let mode = if self.create_if_missing { "rwc" } else { "rw" };
        format!("sqlite:{}?mode={}", self.path, mode)
    }
}

/// Output table configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table replaced on every run.
    pub table: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: crate::storage::schema::SUMMARY_TABLE.to_string(),
        }
    }
}
