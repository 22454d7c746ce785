//! Read computations derived from the movement history.
//!
//! Nothing here caches: every view is recomputed from the full ledger on
//! demand, so a view can never disagree with the history that backs it.

use std::collections::BTreeMap;

use serde::Serialize;

use stockbook_catalog::{Product, ProductId};

use crate::engine::StockLedger;
use crate::movement::{LocationKey, MovementReason, StockMovement};

/// Net on-hand for one location key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSummaryRow {
    pub key: LocationKey,
    pub on_hand: i64,
}

/// FIFO valuation line for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationRow {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub on_hand: i64,
    /// Total value in cents across remaining receipt layers.
    pub value: i64,
    /// Value / on-hand, rounded down to whole cents.
    pub average_cost: i64,
}

/// A product sitting below its reorder point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderAlert {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub on_hand: i64,
    pub reorder_point: i64,
}

impl StockLedger {
    /// Positive net balances per location key, largest first.
    pub fn stock_summary(&self) -> Vec<StockSummaryRow> {
        let mut totals: BTreeMap<LocationKey, i64> = BTreeMap::new();
        for movement in self.entries() {
            *totals.entry(movement.key()).or_insert(0) += movement.signed_quantity();
        }

        let mut rows: Vec<StockSummaryRow> = totals
            .into_iter()
            .filter(|(_, on_hand)| *on_hand > 0)
            .map(|(key, on_hand)| StockSummaryRow { key, on_hand })
            .collect();
        // Descending by quantity; BTreeMap order breaks ties by key.
        rows.sort_by(|a, b| b.on_hand.cmp(&a.on_hand).then(a.key.cmp(&b.key)));
        rows
    }

    /// FIFO stock valuation per product.
    ///
    /// Walks receipt movements in insertion order and counts each layer's
    /// remaining units at that layer's unit cost. A layer's remainder is
    /// approximated as `min(balance_after, quantity_in)`: a receipt whose
    /// running balance has since been consumed below its own quantity has
    /// that many units left at its cost.
    pub fn fifo_valuation(&self, products: &[Product]) -> Vec<ValuationRow> {
        let history = self.entries();
        let mut rows = Vec::new();

        for product in products {
            let mut on_hand = 0i64;
            let mut value = 0i64;

            for layer in history.iter().filter(|m| is_open_receipt(m, product.id)) {
                let remaining = layer.balance_after.min(layer.quantity_in);
                on_hand += remaining;
                value += remaining * layer.unit_cost;
            }

            if on_hand > 0 {
                rows.push(ValuationRow {
                    product_id: product.id,
                    sku: product.sku.clone(),
                    name: product.name.clone(),
                    on_hand,
                    value,
                    average_cost: value / on_hand,
                });
            }
        }

        rows
    }

    /// Products whose total on-hand (across every location) is positive
    /// but below their reorder point. Each finding is logged; the caller
    /// decides how to surface it.
    pub fn reorder_alerts(&self, products: &[Product]) -> Vec<ReorderAlert> {
        let history = self.entries();
        let mut alerts = Vec::new();

        for product in products {
            let on_hand: i64 = history
                .iter()
                .filter(|m| m.product_id == product.id)
                .map(StockMovement::signed_quantity)
                .sum();

            if on_hand > 0 && on_hand < product.reorder_point {
                tracing::warn!(
                    sku = %product.sku,
                    on_hand,
                    reorder_point = product.reorder_point,
                    "stock below reorder point"
                );
                alerts.push(ReorderAlert {
                    product_id: product.id,
                    sku: product.sku.clone(),
                    name: product.name.clone(),
                    on_hand,
                    reorder_point: product.reorder_point,
                });
            }
        }

        alerts
    }
}

fn is_open_receipt(movement: &StockMovement, product: ProductId) -> bool {
    movement.product_id == product
        && movement.transaction_type.is_inbound()
        && movement.transaction_type.reason == MovementReason::Receipt
        && movement.balance_after > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{MovementRequest, TransactionType};

    fn product(id: u32, sku: &str, cost: i64, reorder_point: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: sku.to_string(),
            name: sku.to_string(),
            uom: "PCS".to_string(),
            cost_price: cost,
            selling_price: cost * 2,
            min_stock: 2,
            reorder_point,
            batch_tracked: false,
            serial_tracked: false,
        }
    }

    fn receipt(product: u32, bin: u32, qty: i64, cost: i64) -> MovementRequest {
        MovementRequest::new(product, 1u32, bin, TransactionType::RECEIPT, qty, cost)
    }

    fn issue(product: u32, bin: u32, qty: i64) -> MovementRequest {
        MovementRequest::new(product, 1u32, bin, TransactionType::ISSUE, qty, 0)
    }

    #[test]
    fn summary_nets_per_key_and_sorts_descending() {
        let ledger = StockLedger::permissive();
        ledger.append(receipt(1, 1, 25, 100)).unwrap();
        ledger.append(issue(1, 1, 8)).unwrap();
        ledger.append(receipt(2, 2, 60, 100)).unwrap();
        ledger.append(issue(2, 2, 60)).unwrap(); // nets to zero, dropped

        let summary = ledger.stock_summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].on_hand, 17);
        assert_eq!(summary[0].key.product_id, ProductId(1));
    }

    #[test]
    fn valuation_counts_remaining_receipt_layers() {
        let ledger = StockLedger::permissive();
        // Two receipt layers at different costs, partially consumed.
        ledger.append(receipt(1, 1, 10, 1_000)).unwrap(); // balance 10
        ledger.append(issue(1, 1, 6)).unwrap(); // balance 4
        ledger.append(receipt(1, 1, 5, 1_200)).unwrap(); // balance 9

        let products = [product(1, "LAP-001", 1_000, 3)];
        let rows = ledger.fifo_valuation(&products);
        assert_eq!(rows.len(), 1);

        // Layer remainders: min(10, 10) = 10 and min(9, 5) = 5.
        let row = &rows[0];
        assert_eq!(row.on_hand, 15);
        assert_eq!(row.value, 10 * 1_000 + 5 * 1_200);
        assert_eq!(row.average_cost, row.value / row.on_hand);
    }

    #[test]
    fn valuation_skips_products_with_nothing_on_hand() {
        let ledger = StockLedger::permissive();
        ledger.append(receipt(1, 1, 10, 500)).unwrap();

        let products = [product(1, "A", 500, 3), product(2, "B", 700, 3)];
        let rows = ledger.fifo_valuation(&products);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id, ProductId(1));
    }

    #[test]
    fn reorder_alerts_fire_between_zero_and_reorder_point() {
        let ledger = StockLedger::permissive();
        ledger.append(receipt(1, 1, 20, 100)).unwrap();
        ledger.append(issue(1, 1, 15)).unwrap(); // on hand 5 < reorder 10
        ledger.append(receipt(2, 2, 50, 100)).unwrap(); // comfortably stocked
        ledger.append(receipt(3, 3, 4, 100)).unwrap();
        ledger.append(issue(3, 3, 4)).unwrap(); // zero on hand: no alert

        let products = [
            product(1, "LAP-001", 100, 10),
            product(2, "MON-24", 100, 15),
            product(3, "KBD-MECH", 100, 30),
        ];
        let alerts = ledger.reorder_alerts(&products);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].sku, "LAP-001");
        assert_eq!(alerts[0].on_hand, 5);
    }

    #[test]
    fn reorder_counts_across_all_locations() {
        let ledger = StockLedger::permissive();
        ledger.append(receipt(1, 1, 6, 100)).unwrap();
        ledger.append(receipt(1, 2, 6, 100)).unwrap();

        // 12 on hand across two bins, reorder point 10: no alert.
        let products = [product(1, "LAP-001", 100, 10)];
        assert!(ledger.reorder_alerts(&products).is_empty());
    }
}
