//! Database schema definitions using sea-query.
//!
//! Source tables keep the column names of the inventory database, so every
//! column carries an explicit `iden`.

use sea_query::Iden;

/// Default output table name.
pub const SUMMARY_TABLE: &str = "vendor_sales_summary";

/// Vendor invoices (freight per invoice).
#[derive(Iden)]
pub enum VendorInvoice {
    Table,
    #[iden = "VendorNumber"]
    VendorNumber,
    #[iden = "Freight"]
    Freight,
}

/// Purchase line items.
#[derive(Iden)]
pub enum Purchases {
    Table,
    #[iden = "VendorNumber"]
    VendorNumber,
    #[iden = "VendorName"]
    VendorName,
    #[iden = "Brand"]
    Brand,
    #[iden = "Description"]
    Description,
    #[iden = "PurchasePrice"]
    PurchasePrice,
    #[iden = "Quantity"]
    Quantity,
    #[iden = "Dollars"]
    Dollars,
}

/// Price list, one entry per brand.
#[derive(Iden)]
pub enum PurchasePrices {
    Table,
    #[iden = "Brand"]
    Brand,
    #[iden = "Price"]
    Price,
    #[iden = "Volume"]
    Volume,
}

/// Sales line items.
#[derive(Iden)]
pub enum Sales {
    Table,
    #[iden = "VendorNo"]
    VendorNo,
    #[iden = "Brand"]
    Brand,
    #[iden = "SalesQuantity"]
    SalesQuantity,
    #[iden = "SalesDollars"]
    SalesDollars,
    #[iden = "SalesPrice"]
    SalesPrice,
    #[iden = "ExciseTax"]
    ExciseTax,
}

/// Freight totals per vendor (CTE).
#[derive(Iden)]
pub enum FreightSummary {
    #[iden = "FreightSummary"]
    Table,
    #[iden = "VendorNumber"]
    VendorNumber,
    #[iden = "FreightCost"]
    FreightCost,
}

/// Purchase totals per vendor/brand/price (CTE).
#[derive(Iden)]
pub enum PurchaseSummary {
    #[iden = "PurchaseSummary"]
    Table,
}

/// Sales totals per vendor/brand (CTE).
#[derive(Iden)]
pub enum SalesSummary {
    #[iden = "SalesSummary"]
    Table,
}

/// Output columns, in table order.
///
/// The first fourteen come from the aggregate query, the last four are
/// derived by the transformer.
#[derive(Iden, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryColumn {
    #[iden = "VendorNumber"]
    VendorNumber,
    #[iden = "VendorName"]
    VendorName,
    #[iden = "Brand"]
    Brand,
    #[iden = "Description"]
    Description,
    #[iden = "PurchasePrice"]
    PurchasePrice,
    #[iden = "ActualPrice"]
    ActualPrice,
    #[iden = "Volume"]
    Volume,
    #[iden = "TotalPurchaseQuantity"]
    TotalPurchaseQuantity,
    #[iden = "TotalPurchaseDollars"]
    TotalPurchaseDollars,
    #[iden = "TotalSalesQuantity"]
    TotalSalesQuantity,
    #[iden = "TotalSalesDollars"]
    TotalSalesDollars,
    #[iden = "TotalSalesPrice"]
    TotalSalesPrice,
    #[iden = "TotalExciseTax"]
    TotalExciseTax,
    #[iden = "FreightCost"]
    FreightCost,
    #[iden = "GrossProfit"]
    GrossProfit,
    #[iden = "ProfitMargin"]
    ProfitMargin,
    #[iden = "StockTurnover"]
    StockTurnover,
    #[iden = "SalesToPurchaseRatio"]
    SalesToPurchaseRatio,
}

/// Declared type of an output column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// No declared type; each value keeps its own storage class.
    Key,
    Text,
    Real,
}

impl SummaryColumn {
    /// All output columns in table order.
    pub const ALL: [SummaryColumn; 18] = [
        SummaryColumn::VendorNumber,
        SummaryColumn::VendorName,
        SummaryColumn::Brand,
        SummaryColumn::Description,
        SummaryColumn::PurchasePrice,
        SummaryColumn::ActualPrice,
        SummaryColumn::Volume,
        SummaryColumn::TotalPurchaseQuantity,
        SummaryColumn::TotalPurchaseDollars,
        SummaryColumn::TotalSalesQuantity,
        SummaryColumn::TotalSalesDollars,
        SummaryColumn::TotalSalesPrice,
        SummaryColumn::TotalExciseTax,
        SummaryColumn::FreightCost,
        SummaryColumn::GrossProfit,
        SummaryColumn::ProfitMargin,
        SummaryColumn::StockTurnover,
        SummaryColumn::SalesToPurchaseRatio,
    ];

    pub fn kind(self) -> ColumnKind {
        match self {
            SummaryColumn::VendorNumber | SummaryColumn::Brand => ColumnKind::Key,
            SummaryColumn::VendorName | SummaryColumn::Description => ColumnKind::Text,
            _ => ColumnKind::Real,
        }
    }

    /// Column name as stored in the database.
    pub fn name(self) -> String {
        self.to_string()
    }
}
