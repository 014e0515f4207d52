//! Shared utilities for integration tests.
//!
//! Builds a throwaway inventory database in a temp directory with the four
//! source tables, and reads the summary table back.

#![allow(dead_code)]

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tempfile::TempDir;

use vendor_summary::config::DatabaseConfig;
use vendor_summary::storage;
use vendor_summary::summary::{RawValue, VendorSummaryRow};

/// Source schema; column types follow the CSV-imported inventory database.
pub const SOURCE_SCHEMA: &str = r#"
CREATE TABLE vendor_invoice (
    VendorNumber INTEGER, VendorName TEXT, InvoiceDate TEXT, PONumber INTEGER,
    Quantity INTEGER, Dollars REAL, Freight REAL, Approval TEXT
);
CREATE TABLE purchases (
    InventoryId TEXT, Store INTEGER, Brand INTEGER, Description TEXT, Size TEXT,
    VendorNumber INTEGER, VendorName TEXT, PONumber INTEGER,
    PurchasePrice REAL, Quantity INTEGER, Dollars REAL, Classification INTEGER
);
CREATE TABLE purchase_prices (
    Brand INTEGER, Description TEXT, Price REAL, Size TEXT, Volume TEXT,
    Classification INTEGER, PurchasePrice REAL, VendorNumber INTEGER, VendorName TEXT
);
CREATE TABLE sales (
    InventoryId TEXT, Store INTEGER, Brand INTEGER, Description TEXT, Size TEXT,
    SalesQuantity INTEGER, SalesDollars REAL, SalesPrice REAL, SalesDate TEXT,
    Volume INTEGER, Classification INTEGER, ExciseTax REAL, VendorNo INTEGER, VendorName TEXT
);
"#;

/// An inventory database in a temp directory.
#[derive(Debug)]
pub struct Inventory {
    pub pool: SqlitePool,
    pub config: DatabaseConfig,
    _dir: TempDir,
}

impl Inventory {
    /// Create an empty inventory database with the source tables.
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = DatabaseConfig {
            path: dir
                .path()
                .join("inventory.db")
                .to_string_lossy()
                .into_owned(),
            create_if_missing: true,
        };
        let pool = storage::connect(&config).await.expect("connect");
        sqlx::raw_sql(SOURCE_SCHEMA)
            .execute(&pool)
            .await
            .expect("create source tables");

        Self {
            pool,
            config,
            _dir: dir,
        }
    }

    pub async fn exec(&self, sql: &str) {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .unwrap_or_else(|e| panic!("seed failed: {}\n{}", e, sql));
    }

    pub async fn add_price(&self, brand: i64, price: f64, volume: &str) {
        sqlx::query("INSERT INTO purchase_prices (Brand, Price, Volume) VALUES (?1, ?2, ?3)")
            .bind(brand)
            .bind(price)
            .bind(volume)
            .execute(&self.pool)
            .await
            .expect("insert price");
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_purchase(
        &self,
        vendor: i64,
        vendor_name: &str,
        brand: i64,
        description: &str,
        purchase_price: f64,
        quantity: i64,
        dollars: f64,
    ) {
        sqlx::query(
            "INSERT INTO purchases
                (VendorNumber, VendorName, Brand, Description, PurchasePrice, Quantity, Dollars)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(vendor)
        .bind(vendor_name)
        .bind(brand)
        .bind(description)
        .bind(purchase_price)
        .bind(quantity)
        .bind(dollars)
        .execute(&self.pool)
        .await
        .expect("insert purchase");
    }

    pub async fn add_sale(&self, vendor: i64, brand: i64, quantity: i64, dollars: f64) {
        let price = if quantity == 0 {
            0.0
        } else {
            dollars / quantity as f64
        };
        sqlx::query(
            "INSERT INTO sales (VendorNo, Brand, SalesQuantity, SalesDollars, SalesPrice, ExciseTax)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(vendor)
        .bind(brand)
        .bind(quantity)
        .bind(dollars)
        .bind(price)
        .bind(0.79)
        .execute(&self.pool)
        .await
        .expect("insert sale");
    }

    pub async fn add_freight(&self, vendor: i64, freight: f64) {
        sqlx::query("INSERT INTO vendor_invoice (VendorNumber, Freight) VALUES (?1, ?2)")
            .bind(vendor)
            .bind(freight)
            .execute(&self.pool)
            .await
            .expect("insert freight");
    }

    /// Read the output table in storage order.
    pub async fn summary(&self, table: &str) -> Vec<VendorSummaryRow> {
        let rows = sqlx::query(&format!(r#"SELECT * FROM "{}" ORDER BY rowid"#, table))
            .fetch_all(&self.pool)
            .await
            .expect("read summary");

        rows.iter()
            .map(|r| VendorSummaryRow {
                vendor_number: key_cell(r, "VendorNumber"),
                vendor_name: r.get("VendorName"),
                brand: key_cell(r, "Brand"),
                description: r.get("Description"),
                purchase_price: r.get("PurchasePrice"),
                actual_price: r.get("ActualPrice"),
                volume: r.get("Volume"),
                total_purchase_quantity: r.get("TotalPurchaseQuantity"),
                total_purchase_dollars: r.get("TotalPurchaseDollars"),
                total_sales_quantity: r.get("TotalSalesQuantity"),
                total_sales_dollars: r.get("TotalSalesDollars"),
                total_sales_price: r.get("TotalSalesPrice"),
                total_excise_tax: r.get("TotalExciseTax"),
                freight_cost: r.get("FreightCost"),
                gross_profit: r.get("GrossProfit"),
                profit_margin: r.get("ProfitMargin"),
                stock_turnover: r.get("StockTurnover"),
                sales_to_purchase_ratio: r.get("SalesToPurchaseRatio"),
            })
            .collect()
    }

    /// Row for integer keys (vendor, brand); panics unless exactly one exists.
    pub async fn summary_row(&self, table: &str, vendor: i64, brand: i64) -> VendorSummaryRow {
        self.summary_row_by(table, RawValue::Integer(vendor), RawValue::Integer(brand))
            .await
    }

    /// Row for (vendor, brand) keys of any storage class.
    pub async fn summary_row_by(
        &self,
        table: &str,
        vendor: RawValue,
        brand: RawValue,
    ) -> VendorSummaryRow {
        let mut matching: Vec<_> = self
            .summary(table)
            .await
            .into_iter()
            .filter(|r| r.vendor_number == vendor && r.brand == brand)
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "expected one row for vendor {} brand {}",
            vendor,
            brand
        );
        matching.remove(0)
    }
}

/// Key cells keep the storage class they were written with.
fn key_cell(row: &SqliteRow, column: &str) -> RawValue {
    if let Ok(n) = row.try_get::<i64, _>(column) {
        return RawValue::Integer(n);
    }
    if let Ok(x) = row.try_get::<f64, _>(column) {
        return RawValue::Real(x);
    }
    RawValue::Text(row.get(column))
}

/// Assert two metrics agree to two decimal places.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005 + 1e-9,
        "expected {} got {}",
        expected,
        actual
    );
}
