//! SQLite SummarySink: drop, recreate and fill the output table.

use async_trait::async_trait;
use sea_query::{
    Alias, ColumnDef, Query, SchemaStatementBuilder, SimpleExpr, SqliteQueryBuilder, Table, Value,
};
use sea_query_binder::SqlxBinder;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;
use crate::storage::schema::{ColumnKind, SummaryColumn};
use crate::storage::SummarySink;
use crate::summary::{RawValue, VendorSummaryRow};

/// Rows per INSERT statement. 18 columns × 50 rows stays under SQLite's
/// 999 bound-parameter limit.
const INSERT_BATCH_ROWS: usize = 50;

/// SQLite-backed summary sink.
pub struct SqliteSummarySink {
    pool: SqlitePool,
}

impl SqliteSummarySink {
    /// Create a new SQLite summary sink.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummarySink for SqliteSummarySink {
    async fn persist(&self, rows: &[VendorSummaryRow], table: &str) -> Result<u64> {
        // Dropping the transaction without commit rolls back, so a failed
        // write leaves the previous table in place.
        let mut tx = self.pool.begin().await?;

        let drop = Table::drop()
            .table(Alias::new(table))
            .if_exists()
            .to_string(SqliteQueryBuilder);
        sqlx::query(&drop).execute(&mut *tx).await?;

        sqlx::query(&create_table_sql(table))
            .execute(&mut *tx)
            .await?;

        let mut written = 0;
        for batch in rows.chunks(INSERT_BATCH_ROWS) {
            let (sql, values) = insert_batch(table, batch).build_sqlx(SqliteQueryBuilder);
            let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        debug!(table = %table, rows = written, "Summary table replaced");
        Ok(written)
    }
}

fn create_table_sql(table: &str) -> String {
    let mut create = Table::create();
    create.table(Alias::new(table));

    for column in SummaryColumn::ALL {
        let mut def = ColumnDef::new(column);
        match column.kind() {
            ColumnKind::Key => {}
            ColumnKind::Text => {
                def.text();
            }
            ColumnKind::Real => {
                def.double();
            }
        }
        create.col(def.not_null());
    }

    create.to_string(SqliteQueryBuilder)
}

fn insert_batch(table: &str, rows: &[VendorSummaryRow]) -> sea_query::InsertStatement {
    let mut insert = Query::insert();
    insert.into_table(Alias::new(table)).columns(SummaryColumn::ALL);

    for row in rows {
        insert.values_panic(row_values(row));
    }

    insert
}

fn row_values(row: &VendorSummaryRow) -> [SimpleExpr; 18] {
    [
        key_value(&row.vendor_number),
        row.vendor_name.clone().into(),
        key_value(&row.brand),
        row.description.clone().into(),
        row.purchase_price.into(),
        row.actual_price.into(),
        row.volume.into(),
        row.total_purchase_quantity.into(),
        row.total_purchase_dollars.into(),
        row.total_sales_quantity.into(),
        row.total_sales_dollars.into(),
        row.total_sales_price.into(),
        row.total_excise_tax.into(),
        row.freight_cost.into(),
        row.gross_profit.into(),
        row.profit_margin.into(),
        row.stock_turnover.into(),
        row.sales_to_purchase_ratio.into(),
    ]
}

/// Bind a key with the storage class it was read with.
fn key_value(key: &RawValue) -> SimpleExpr {
    match key {
        RawValue::Null => Value::BigInt(None).into(),
        RawValue::Integer(n) => (*n).into(),
        RawValue::Real(x) => (*x).into(),
        RawValue::Text(s) => s.clone().into(),
    }
}
