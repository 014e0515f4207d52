//! Aggregate query over the inventory tables.
//!
//! Three grouped CTEs (freight per vendor, purchases per vendor/brand/price,
//! sales per vendor/brand) joined with purchases as the anchor, so every
//! purchase group survives even without sales or freight.

use sea_query::{
    CommonTableExpression, Condition, Expr, Order, Query, QueryStatementWriter, SelectStatement,
    SqliteQueryBuilder, WithClause,
};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::model::{AggregateRow, RawValue};
use crate::error::{Result, SummaryError};
use crate::storage::schema::{
    FreightSummary, PurchasePrices, PurchaseSummary, Purchases, Sales, SalesSummary,
    SummaryColumn, VendorInvoice,
};

/// Columns taken from the purchase summary, in output order.
const PURCHASE_COLUMNS: [SummaryColumn; 9] = [
    SummaryColumn::VendorNumber,
    SummaryColumn::VendorName,
    SummaryColumn::Brand,
    SummaryColumn::Description,
    SummaryColumn::PurchasePrice,
    SummaryColumn::ActualPrice,
    SummaryColumn::Volume,
    SummaryColumn::TotalPurchaseQuantity,
    SummaryColumn::TotalPurchaseDollars,
];

/// Columns taken from the sales summary, in output order.
const SALES_COLUMNS: [SummaryColumn; 4] = [
    SummaryColumn::TotalSalesQuantity,
    SummaryColumn::TotalSalesDollars,
    SummaryColumn::TotalSalesPrice,
    SummaryColumn::TotalExciseTax,
];

/// Builder for the vendor summary statement.
pub struct VendorSummaryQuery;

impl VendorSummaryQuery {
    /// Render the full `WITH ... SELECT` statement for SQLite.
    pub fn build() -> String {
        let ctes = WithClause::new()
            .cte(freight_summary())
            .cte(purchase_summary())
            .cte(sales_summary())
            .to_owned();

        joined_summary().with(ctes).to_string(SqliteQueryBuilder)
    }
}

/// Run the aggregate query and decode every row.
pub async fn fetch_vendor_summary(pool: &SqlitePool) -> Result<Vec<AggregateRow>> {
    let sql = VendorSummaryQuery::build();
    debug!(sql = %sql, "running vendor summary query");

    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(decode_row).collect()
}

fn freight_summary() -> CommonTableExpression {
    let query = Query::select()
        .column(VendorInvoice::VendorNumber)
        .expr_as(
            Expr::col(VendorInvoice::Freight).sum(),
            FreightSummary::FreightCost,
        )
        .from(VendorInvoice::Table)
        .group_by_col(VendorInvoice::VendorNumber)
        .to_owned();

    CommonTableExpression::new()
        .query(query)
        .table_name(FreightSummary::Table)
        .to_owned()
}

fn purchase_summary() -> CommonTableExpression {
    let query = Query::select()
        .column((Purchases::Table, Purchases::VendorNumber))
        .column((Purchases::Table, Purchases::VendorName))
        .column((Purchases::Table, Purchases::Brand))
        .column((Purchases::Table, Purchases::Description))
        .column((Purchases::Table, Purchases::PurchasePrice))
        .expr_as(
            Expr::col((PurchasePrices::Table, PurchasePrices::Price)),
            SummaryColumn::ActualPrice,
        )
        .column((PurchasePrices::Table, PurchasePrices::Volume))
        .expr_as(
            Expr::col((Purchases::Table, Purchases::Quantity)).sum(),
            SummaryColumn::TotalPurchaseQuantity,
        )
        .expr_as(
            Expr::col((Purchases::Table, Purchases::Dollars)).sum(),
            SummaryColumn::TotalPurchaseDollars,
        )
        .from(Purchases::Table)
        .inner_join(
            PurchasePrices::Table,
            Expr::col((Purchases::Table, Purchases::Brand))
                .equals((PurchasePrices::Table, PurchasePrices::Brand)),
        )
        .and_where(Expr::col((Purchases::Table, Purchases::PurchasePrice)).gt(0))
        .group_by_col((Purchases::Table, Purchases::VendorNumber))
        .group_by_col((Purchases::Table, Purchases::VendorName))
        .group_by_col((Purchases::Table, Purchases::Brand))
        .group_by_col((Purchases::Table, Purchases::Description))
        .group_by_col((Purchases::Table, Purchases::PurchasePrice))
        .group_by_col((PurchasePrices::Table, PurchasePrices::Price))
        .group_by_col((PurchasePrices::Table, PurchasePrices::Volume))
        .to_owned();

    CommonTableExpression::new()
        .query(query)
        .table_name(PurchaseSummary::Table)
        .to_owned()
}

fn sales_summary() -> CommonTableExpression {
    let query = Query::select()
        .column(Sales::VendorNo)
        .column(Sales::Brand)
        .expr_as(
            Expr::col(Sales::SalesQuantity).sum(),
            SummaryColumn::TotalSalesQuantity,
        )
        .expr_as(
            Expr::col(Sales::SalesDollars).sum(),
            SummaryColumn::TotalSalesDollars,
        )
        .expr_as(
            Expr::col(Sales::SalesPrice).sum(),
            SummaryColumn::TotalSalesPrice,
        )
        .expr_as(
            Expr::col(Sales::ExciseTax).sum(),
            SummaryColumn::TotalExciseTax,
        )
        .from(Sales::Table)
        .group_by_col(Sales::VendorNo)
        .group_by_col(Sales::Brand)
        .to_owned();

    CommonTableExpression::new()
        .query(query)
        .table_name(SalesSummary::Table)
        .to_owned()
}

fn joined_summary() -> SelectStatement {
    let mut select = Query::select();

    for column in PURCHASE_COLUMNS {
        select.column((PurchaseSummary::Table, column));
    }
    for column in SALES_COLUMNS {
        select.column((SalesSummary::Table, column));
    }
    select.column((FreightSummary::Table, FreightSummary::FreightCost));

    select
        .from(PurchaseSummary::Table)
        .left_join(
            SalesSummary::Table,
            Condition::all()
                .add(
                    Expr::col((PurchaseSummary::Table, SummaryColumn::VendorNumber))
                        .equals((SalesSummary::Table, Sales::VendorNo)),
                )
                .add(
                    Expr::col((PurchaseSummary::Table, SummaryColumn::Brand))
                        .equals((SalesSummary::Table, Sales::Brand)),
                ),
        )
        .left_join(
            FreightSummary::Table,
            Expr::col((PurchaseSummary::Table, SummaryColumn::VendorNumber))
                .equals((FreightSummary::Table, FreightSummary::VendorNumber)),
        )
        .order_by((PurchaseSummary::Table, SummaryColumn::VendorNumber), Order::Asc)
        .order_by((PurchaseSummary::Table, SummaryColumn::Brand), Order::Asc)
        .order_by((PurchaseSummary::Table, SummaryColumn::Description), Order::Asc)
        .order_by((PurchaseSummary::Table, SummaryColumn::PurchasePrice), Order::Asc)
        .to_owned()
}

fn decode_row(row: &SqliteRow) -> Result<AggregateRow> {
    Ok(AggregateRow {
        vendor_number: read_raw(row, SummaryColumn::VendorNumber)?,
        vendor_name: read_text(row, SummaryColumn::VendorName)?,
        brand: read_raw(row, SummaryColumn::Brand)?,
        description: read_text(row, SummaryColumn::Description)?,
        purchase_price: read_number(row, SummaryColumn::PurchasePrice)?,
        actual_price: read_number(row, SummaryColumn::ActualPrice)?,
        volume: read_raw(row, SummaryColumn::Volume)?,
        total_purchase_quantity: read_number(row, SummaryColumn::TotalPurchaseQuantity)?,
        total_purchase_dollars: read_number(row, SummaryColumn::TotalPurchaseDollars)?,
        total_sales_quantity: read_number(row, SummaryColumn::TotalSalesQuantity)?,
        total_sales_dollars: read_number(row, SummaryColumn::TotalSalesDollars)?,
        total_sales_price: read_number(row, SummaryColumn::TotalSalesPrice)?,
        total_excise_tax: read_number(row, SummaryColumn::TotalExciseTax)?,
        freight_cost: read_number(row, SummaryColumn::FreightCost)?,
    })
}

// SQLite columns are dynamically typed: SUM over integers yields INTEGER,
// over reals REAL, and imported CSV data often lands as TEXT. Each reader
// tries the storage classes in turn.

fn try_decode<'r, T>(row: &'r SqliteRow, column: &str) -> Option<Option<T>>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(column).ok()
}

fn read_number(row: &SqliteRow, column: SummaryColumn) -> Result<Option<f64>> {
    let name = column.name();
    if let Some(value) = try_decode::<f64>(row, &name) {
        return Ok(value);
    }
    if let Some(value) = try_decode::<i64>(row, &name) {
        return Ok(value.map(|n| n as f64));
    }
    match row.try_get::<Option<String>, _>(name.as_str())? {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| SummaryError::decode(&name, format!("not a number: {:?}", text))),
    }
}

fn read_text(row: &SqliteRow, column: SummaryColumn) -> Result<Option<String>> {
    let name = column.name();
    if let Some(value) = try_decode::<String>(row, &name) {
        return Ok(value);
    }
    if let Some(value) = try_decode::<i64>(row, &name) {
        return Ok(value.map(|n| n.to_string()));
    }
    let value: Option<f64> = row.try_get(name.as_str())?;
    Ok(value.map(|f| f.to_string()))
}

fn read_raw(row: &SqliteRow, column: SummaryColumn) -> Result<RawValue> {
    let name = column.name();
    if let Some(value) = try_decode::<i64>(row, &name) {
        return Ok(value.map_or(RawValue::Null, RawValue::Integer));
    }
    if let Some(value) = try_decode::<f64>(row, &name) {
        return Ok(value.map_or(RawValue::Null, RawValue::Real));
    }
    let value: Option<String> = row.try_get(name.as_str())?;
    Ok(value.map_or(RawValue::Null, RawValue::Text))
}
