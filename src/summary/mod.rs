//! Vendor summary: aggregate query and row transformation.

mod aggregate;
mod model;
mod transform;

pub use aggregate::{fetch_vendor_summary, VendorSummaryQuery};
pub use model::{AggregateRow, RawValue, VendorSummaryRow};
pub use transform::{guarded_ratio, transform};
