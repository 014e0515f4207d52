//! Storage: database connection and the summary table sink.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::summary::VendorSummaryRow;

pub mod schema;
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use sqlite::SqliteSummarySink;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockSummarySink;

/// Destination for the finished summary.
///
/// `persist` replaces the named table wholesale: after a successful call the
/// table holds exactly `rows`. On failure the previous contents are kept.
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Write `rows` to `table`, returning the number of rows written.
    async fn persist(&self, rows: &[VendorSummaryRow], table: &str) -> Result<u64>;
}

/// Open the inventory database.
///
/// The pool holds a single connection; the job never needs more.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    if config.create_if_missing {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.url())
        .await?;

    info!(path = %config.path, "Connected to inventory database");
    Ok(pool)
}
