use serde::Serialize;

use stockbook_catalog::Product;
use stockbook_ledger::StockLedger;

/// Headline figures for the inventory dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    /// Units on hand across every location.
    pub total_units: i64,
    /// FIFO stock value in cents.
    pub stock_value: i64,
    pub low_stock_count: usize,
}

pub fn dashboard_summary(products: &[Product], ledger: &StockLedger) -> DashboardSummary {
    let summary = ledger.stock_summary();
    let valuation = ledger.fifo_valuation(products);

    DashboardSummary {
        product_count: products.len(),
        total_units: summary.iter().map(|row| row.on_hand).sum(),
        stock_value: valuation.iter().map(|row| row.value).sum(),
        low_stock_count: ledger.reorder_alerts(products).len(),
    }
}
