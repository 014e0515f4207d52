//! The summary job: aggregate, transform, persist.
//!
//! `run` is the fallible core. `run_job` wraps it for the binary: it owns the
//! connection and is the one place where errors are logged instead of
//! returned.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Result, SummaryError};
use crate::storage::{self, SqliteSummarySink, SummarySink};
use crate::summary::{fetch_vendor_summary, transform};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Rows returned by the aggregate query.
    pub aggregated_rows: usize,
    /// Rows written to the output table.
    pub written_rows: u64,
    /// Output table name.
    pub table: String,
}

/// Build the vendor summary from `pool` and hand it to `sink` as `table`.
///
/// Any failure stops the run before the next step; nothing is written
/// unless aggregation and transformation both succeed.
pub async fn run(pool: &SqlitePool, sink: &dyn SummarySink, table: &str) -> Result<RunReport> {
    info!(table = %table, "PROCESS STARTED: creating vendor summary table");

    let aggregated = fetch_vendor_summary(pool).await?;
    let aggregated_rows = aggregated.len();
    info!(rows = aggregated_rows, "Step 1/3: built vendor summary");

    let summary = transform(aggregated)?;
    info!(rows = summary.len(), "Step 2/3: cleaned and transformed summary");

    let written_rows = sink.persist(&summary, table).await?;
    info!(rows = written_rows, table = %table, "Step 3/3: persisted summary");

    Ok(RunReport {
        aggregated_rows,
        written_rows,
        table: table.to_string(),
    })
}

/// How a job ended. Either way the connection is closed and
/// `PROCESS FINISHED` has been logged.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunReport),
    Failed(SummaryError),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Run the job against the configured database and SQLite output table.
pub async fn run_job(config: &Config) -> RunOutcome {
    run_job_with(config, |pool| Arc::new(SqliteSummarySink::new(pool))).await
}

/// Run the job with a sink built from the opened pool.
///
/// Never returns an error: failures are logged as `AN ERROR OCCURRED` and
/// reported in the outcome.
pub async fn run_job_with<F>(config: &Config, make_sink: F) -> RunOutcome
where
    F: FnOnce(SqlitePool) -> Arc<dyn SummarySink>,
{
    let outcome = match storage::connect(&config.database).await {
        Ok(pool) => {
            let sink = make_sink(pool.clone());
            let result = run(&pool, sink.as_ref(), &config.output.table).await;
            pool.close().await;
            match result {
                Ok(report) => RunOutcome::Completed(report),
                Err(e) => RunOutcome::Failed(e),
            }
        }
        Err(e) => RunOutcome::Failed(e),
    };

    match &outcome {
        RunOutcome::Completed(report) => info!(
            rows = report.written_rows,
            table = %report.table,
            "Vendor summary written"
        ),
        RunOutcome::Failed(e) => error!(error = %e, "AN ERROR OCCURRED"),
    }
    info!("PROCESS FINISHED");
    outcome
}
