//! Row types flowing through the summary job.

use std::fmt;

/// A dynamically typed SQLite cell.
///
/// Used for columns whose storage class varies between databases: the
/// price list's `Volume`, and the `VendorNumber` and `Brand` keys, which
/// are integers in most inventories and codes like `V1` in others.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl RawValue {
    /// Numeric reading of the cell.
    ///
    /// Text is parsed after trimming. Null, unparsable text and non-finite
    /// numbers have no numeric reading.
    pub fn to_numeric(&self) -> Option<f64> {
        let value = match self {
            RawValue::Null => return None,
            RawValue::Integer(n) => *n as f64,
            RawValue::Real(f) => *f,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// The cell with Null replaced by integer 0. Other cells are unchanged.
    pub fn or_zero(self) -> RawValue {
        match self {
            RawValue::Null => RawValue::Integer(0),
            other => other,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "NULL"),
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Real(x) => write!(f, "{}", x),
            RawValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Integer(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// One row of the aggregate query, before cleaning.
///
/// Every field can be missing: sales and freight columns are empty for
/// purchases with no matching sales or invoices.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub vendor_number: RawValue,
    pub vendor_name: Option<String>,
    pub brand: RawValue,
    pub description: Option<String>,
    pub purchase_price: Option<f64>,
    pub actual_price: Option<f64>,
    pub volume: RawValue,
    pub total_purchase_quantity: Option<f64>,
    pub total_purchase_dollars: Option<f64>,
    pub total_sales_quantity: Option<f64>,
    pub total_sales_dollars: Option<f64>,
    pub total_sales_price: Option<f64>,
    pub total_excise_tax: Option<f64>,
    pub freight_cost: Option<f64>,
}

impl Default for AggregateRow {
    fn default() -> Self {
        Self {
            vendor_number: RawValue::Null,
            vendor_name: None,
            brand: RawValue::Null,
            description: None,
            purchase_price: None,
            actual_price: None,
            volume: RawValue::Null,
            total_purchase_quantity: None,
            total_purchase_dollars: None,
            total_sales_quantity: None,
            total_sales_dollars: None,
            total_sales_price: None,
            total_excise_tax: None,
            freight_cost: None,
        }
    }
}

/// One row of the `vendor_sales_summary` table.
///
/// The keys keep the storage class they had in the source tables and are
/// never `RawValue::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorSummaryRow {
    pub vendor_number: RawValue,
    pub vendor_name: String,
    pub brand: RawValue,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
    /// Sales revenue minus purchase cost.
    pub gross_profit: f64,
    /// Gross profit as a percentage of sales revenue.
    pub profit_margin: f64,
    /// Units sold per unit purchased.
    pub stock_turnover: f64,
    pub sales_to_purchase_ratio: f64,
}
