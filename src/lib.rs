//! Vendor sales summary
//!
//! Batch job over an inventory database: aggregates freight, purchases and
//! sales per vendor and brand, derives profit metrics, and replaces the
//! `vendor_sales_summary` table with the result.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod summary;
pub mod utils;

pub use error::{Result, SummaryError};
pub use pipeline::{run, run_job, RunOutcome, RunReport};
