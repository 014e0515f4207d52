//! vendor-summary: Vendor sales summary batch job
//!
//! Reads the inventory database, builds the per-vendor, per-brand summary
//! and replaces the `vendor_sales_summary` table.
//!
//! ## Configuration
//! - `vendor_summary.yaml` in the working directory (optional)
//! - VENDOR_SUMMARY_CONFIG: path to a YAML config file (optional)
//! - VENDOR_SUMMARY__<SECTION>__<KEY>: overrides, e.g. VENDOR_SUMMARY__DATABASE__PATH
//! - VENDOR_SUMMARY_LOG: log filter (default from `logging.level`)
//!
//! Run failures are logged and the process still exits normally. Only bad
//! configuration or a logging setup failure exits with an error.

use vendor_summary::config::Config;
use vendor_summary::run_job;
use vendor_summary::utils::bootstrap::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;
    init_tracing(&config.logging)?;

    run_job(&config).await;
    Ok(())
}
