//! Cleaning and derived metrics for the aggregate rows.
//!
//! Zero-filling runs before the ratios, so a missing denominator is caught
//! by the same guard as a zero one.

use super::model::{AggregateRow, VendorSummaryRow};
use crate::error::{Result, SummaryError};

/// Clean every aggregate row and append the derived metrics.
///
/// Keys pass through unchanged except that a missing key becomes 0.
///
/// Unlike the zero-fill and ratio guards, an infinite measure is not
/// repaired: it fails the whole call with `SummaryError::Transform` and no
/// row is returned, where a plain fill-and-divide would have written the
/// infinity to the table.
pub fn transform(rows: Vec<AggregateRow>) -> Result<Vec<VendorSummaryRow>> {
    rows.into_iter().map(transform_row).collect()
}

fn transform_row(row: AggregateRow) -> Result<VendorSummaryRow> {
    let vendor_number = row.vendor_number.or_zero();
    let brand = row.brand.or_zero();

    let volume = row.volume.to_numeric().unwrap_or(0.0);

    let measure = |value: Option<f64>, column: &str| -> Result<f64> {
        let value = value.unwrap_or(0.0);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SummaryError::Transform(format!(
                "{} is {} for vendor {} brand {}",
                column, value, vendor_number, brand
            )))
        }
    };

    let purchase_price = measure(row.purchase_price, "PurchasePrice")?;
    let actual_price = measure(row.actual_price, "ActualPrice")?;
    let total_purchase_quantity = measure(row.total_purchase_quantity, "TotalPurchaseQuantity")?;
    let total_purchase_dollars = measure(row.total_purchase_dollars, "TotalPurchaseDollars")?;
    let total_sales_quantity = measure(row.total_sales_quantity, "TotalSalesQuantity")?;
    let total_sales_dollars = measure(row.total_sales_dollars, "TotalSalesDollars")?;
    let total_sales_price = measure(row.total_sales_price, "TotalSalesPrice")?;
    let total_excise_tax = measure(row.total_excise_tax, "TotalExciseTax")?;
    let freight_cost = measure(row.freight_cost, "FreightCost")?;

    let vendor_name = row.vendor_name.unwrap_or_default().trim().to_string();
    let description = row.description.unwrap_or_default().trim().to_string();

    let gross_profit = measure(
        Some(total_sales_dollars - total_purchase_dollars),
        "GrossProfit",
    )?;
    let profit_margin = guarded_ratio(gross_profit, total_sales_dollars) * 100.0;
    let profit_margin = if profit_margin.is_finite() {
        profit_margin
    } else {
        0.0
    };

    Ok(VendorSummaryRow {
        vendor_number,
        vendor_name,
        brand,
        description,
        purchase_price,
        actual_price,
        volume,
        total_purchase_quantity,
        total_purchase_dollars,
        total_sales_quantity,
        total_sales_dollars,
        total_sales_price,
        total_excise_tax,
        freight_cost,
        gross_profit,
        profit_margin,
        stock_turnover: guarded_ratio(total_sales_quantity, total_purchase_quantity),
        sales_to_purchase_ratio: guarded_ratio(total_sales_dollars, total_purchase_dollars),
    })
}

/// `numerator / denominator`, or 0 when the division is undefined.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
