//! Mock summary sink for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SummarySink;
use crate::error::{Result, SummaryError};
use crate::summary::VendorSummaryRow;

/// Mock sink that keeps persisted tables in memory.
#[derive(Default)]
pub struct MockSummarySink {
    tables: RwLock<HashMap<String, Vec<VendorSummaryRow>>>,
    persist_calls: RwLock<usize>,
    fail_on_persist: RwLock<bool>,
}

impl MockSummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_persist(&self, fail: bool) {
        *self.fail_on_persist.write().await = fail;
    }

    /// Rows last persisted to `table`, if any.
    pub async fn table(&self, table: &str) -> Option<Vec<VendorSummaryRow>> {
        self.tables.read().await.get(table).cloned()
    }

    pub async fn persist_calls(&self) -> usize {
        *self.persist_calls.read().await
    }
}

#[async_trait]
impl SummarySink for MockSummarySink {
    async fn persist(&self, rows: &[VendorSummaryRow], table: &str) -> Result<u64> {
        *self.persist_calls.write().await += 1;
        if *self.fail_on_persist.read().await {
            return Err(SummaryError::DataAccess(sqlx::Error::Protocol(format!(
                "mock sink refused table {}",
                table
            ))));
        }
        self.tables
            .write()
            .await
            .insert(table.to_string(), rows.to_vec());
        Ok(rows.len() as u64)
    }
}
