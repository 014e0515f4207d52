//! Cucumber BDD tests for the vendor sales summary.
//!
//! Run with: cargo test --test scenarios

#[path = "../common/mod.rs"]
mod common;

use cucumber::{given, then, when, World};

use common::{assert_close, Inventory};
use vendor_summary::storage::SqliteSummarySink;
use vendor_summary::summary::{RawValue, VendorSummaryRow};

const TABLE: &str = "vendor_sales_summary";

#[derive(Debug, Default, World)]
pub struct SummaryWorld {
    inventory: Option<Inventory>,
    runs: Vec<Vec<VendorSummaryRow>>,
}

impl SummaryWorld {
    fn inventory(&self) -> &Inventory {
        self.inventory.as_ref().expect("inventory not initialized")
    }

    fn latest(&self) -> &[VendorSummaryRow] {
        self.runs.last().expect("summary not built")
    }

    fn row(&self, vendor: i64, brand: i64) -> &VendorSummaryRow {
        let matching: Vec<_> = self
            .latest()
            .iter()
            .filter(|r| {
                r.vendor_number == RawValue::Integer(vendor) && r.brand == RawValue::Integer(brand)
            })
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "expected one row for vendor {} brand {}",
            vendor,
            brand
        );
        matching[0]
    }

    async fn build(&mut self) {
        let inventory = self.inventory();
        let sink = SqliteSummarySink::new(inventory.pool.clone());
        vendor_summary::run(&inventory.pool, &sink, TABLE)
            .await
            .expect("pipeline should succeed");
        let rows = inventory.summary(TABLE).await;
        self.runs.push(rows);
    }
}

fn metric(row: &VendorSummaryRow, column: &str) -> f64 {
    match column {
        "PurchasePrice" => row.purchase_price,
        "ActualPrice" => row.actual_price,
        "Volume" => row.volume,
        "TotalPurchaseQuantity" => row.total_purchase_quantity,
        "TotalPurchaseDollars" => row.total_purchase_dollars,
        "TotalSalesQuantity" => row.total_sales_quantity,
        "TotalSalesDollars" => row.total_sales_dollars,
        "TotalSalesPrice" => row.total_sales_price,
        "TotalExciseTax" => row.total_excise_tax,
        "FreightCost" => row.freight_cost,
        "GrossProfit" => row.gross_profit,
        "ProfitMargin" => row.profit_margin,
        "StockTurnover" => row.stock_turnover,
        "SalesToPurchaseRatio" => row.sales_to_purchase_ratio,
        other => panic!("unknown summary column {}", other),
    }
}

// --- Given steps ---

#[given("an empty inventory database")]
async fn empty_inventory(world: &mut SummaryWorld) {
    world.inventory = Some(Inventory::new().await);
    world.runs.clear();
}

#[given(expr = "brand {int} is listed at {float} with volume {string}")]
async fn brand_listed(world: &mut SummaryWorld, brand: i64, price: f64, volume: String) {
    world.inventory().add_price(brand, price, &volume).await;
}

#[given(expr = "vendor {int} {string} bought {int} units of brand {int} {string} at {float} for {float}")]
#[allow(clippy::too_many_arguments)]
async fn vendor_bought(
    world: &mut SummaryWorld,
    vendor: i64,
    vendor_name: String,
    quantity: i64,
    brand: i64,
    description: String,
    purchase_price: f64,
    dollars: f64,
) {
    world
        .inventory()
        .add_purchase(
            vendor,
            &vendor_name,
            brand,
            &description,
            purchase_price,
            quantity,
            dollars,
        )
        .await;
}

#[given(expr = "vendor {int} sold {int} units of brand {int} for {float}")]
async fn vendor_sold(world: &mut SummaryWorld, vendor: i64, quantity: i64, brand: i64, dollars: f64) {
    world
        .inventory()
        .add_sale(vendor, brand, quantity, dollars)
        .await;
}

#[given(expr = "vendor {int} paid {float} in freight")]
async fn vendor_paid_freight(world: &mut SummaryWorld, vendor: i64, freight: f64) {
    world.inventory().add_freight(vendor, freight).await;
}

// --- When steps ---

#[when("the vendor summary is built")]
async fn summary_built(world: &mut SummaryWorld) {
    world.build().await;
}

#[when("the vendor summary is built again")]
async fn summary_built_again(world: &mut SummaryWorld) {
    world.build().await;
}

// --- Then steps ---

#[then(expr = "the summary has {int} rows")]
fn summary_has_rows(world: &mut SummaryWorld, count: usize) {
    assert_eq!(world.latest().len(), count);
}

#[then(expr = "vendor {int} brand {int} has {word} of {float}")]
fn vendor_brand_metric(
    world: &mut SummaryWorld,
    vendor: i64,
    brand: i64,
    column: String,
    expected: f64,
) {
    assert_close(metric(world.row(vendor, brand), &column), expected);
}

#[then("both runs wrote identical tables")]
fn runs_identical(world: &mut SummaryWorld) {
    assert_eq!(world.runs.len(), 2, "expected two runs");
    assert!(!world.runs[0].is_empty());
    assert_eq!(world.runs[0], world.runs[1]);
}

#[tokio::main]
async fn main() {
    SummaryWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features")
        .await;
}
