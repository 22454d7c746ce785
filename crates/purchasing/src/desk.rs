use std::sync::RwLock;

use chrono::NaiveDate;
use thiserror::Error;

use stockbook_catalog::{BinId, WarehouseId};
use stockbook_ledger::{LedgerError, MovementRequest, ReferenceType, StockLedger, TransactionType};
use stockbook_parties::PartyId;

use crate::order::{
    GoodsReceipt, GrnId, GrnLine, PoLine, PurchaseOrder, PurchaseOrderId, PurchaseOrderStatus,
};

/// Error raised by purchasing operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchasingError {
    #[error("unknown purchase order {0}")]
    UnknownOrder(PurchaseOrderId),

    #[error("purchase order {0} already received")]
    AlreadyReceived(PurchaseOrderId),

    #[error("purchase order must have lines")]
    EmptyOrder,

    /// The ledger refused a receipt line (referential failure or, with a
    /// negative quantity, the balance gate).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("purchasing store lock poisoned")]
    Poisoned,
}

/// Input line for a new purchase order; totals are derived by the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoLine {
    pub product_id: stockbook_catalog::ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_cost: i64,
}

/// A new purchase order. Id, number, and totals are assigned by the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    pub supplier_id: PartyId,
    pub supplier_name: String,
    pub order_date: NaiveDate,
    pub expected_date: NaiveDate,
    pub lines: Vec<NewPoLine>,
}

/// Delivery details for receiving a purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveDelivery {
    pub po_id: PurchaseOrderId,
    pub warehouse_id: WarehouseId,
    pub bin_id: BinId,
    pub received_date: NaiveDate,
    pub lines: Vec<GrnLine>,
}

/// In-memory store for purchase orders and goods receipts.
#[derive(Debug, Default)]
pub struct PurchasingDesk {
    orders: RwLock<Vec<PurchaseOrder>>,
    receipts: RwLock<Vec<GoodsReceipt>>,
}

impl PurchasingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new purchase order. Numbers run PO-1001, PO-1002, ...;
    /// tax is 10% of the subtotal.
    pub fn create_order(&self, new: NewPurchaseOrder) -> Result<PurchaseOrder, PurchasingError> {
        if new.lines.is_empty() {
            return Err(PurchasingError::EmptyOrder);
        }

        let mut orders = self.orders.write().map_err(|_| PurchasingError::Poisoned)?;
        let seq = orders.len() as u32;
        let lines: Vec<PoLine> = new
            .lines
            .into_iter()
            .map(|line| PoLine {
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                unit_cost: line.unit_cost,
                line_total: line.quantity * line.unit_cost,
            })
            .collect();
        let subtotal: i64 = lines.iter().map(|l| l.line_total).sum();
        let tax = subtotal / 10;

        let order = PurchaseOrder {
            id: PurchaseOrderId(seq + 1),
            po_no: format!("PO-{:04}", 1001 + seq),
            supplier_id: new.supplier_id,
            supplier_name: new.supplier_name,
            order_date: new.order_date,
            expected_date: new.expected_date,
            status: PurchaseOrderStatus::Sent,
            lines,
            subtotal,
            tax,
            total: subtotal + tax,
        };

        tracing::info!(po_no = %order.po_no, supplier = %order.supplier_name, "purchase order created");
        orders.push(order.clone());
        Ok(order)
    }

    /// Receive a delivery against a Sent order.
    ///
    /// Posts one inbound Receipt movement per line to the ledger, records
    /// the GRN, and marks the order Received. Ledger rejections propagate
    /// (this is an interactive path, not seeding); movements already
    /// posted for earlier lines stay recorded, as corrections in an
    /// append-only ledger are offsetting entries rather than rollbacks.
    pub fn receive(
        &self,
        ledger: &StockLedger,
        delivery: ReceiveDelivery,
    ) -> Result<GoodsReceipt, PurchasingError> {
        let mut orders = self.orders.write().map_err(|_| PurchasingError::Poisoned)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == delivery.po_id)
            .ok_or(PurchasingError::UnknownOrder(delivery.po_id))?;
        if order.is_received() {
            return Err(PurchasingError::AlreadyReceived(order.id));
        }

        let mut receipts = self.receipts.write().map_err(|_| PurchasingError::Poisoned)?;
        let seq = receipts.len() as u32;
        let grn_seq = format!("{:04}", 1001 + seq);
        let grn_no = format!("GRN-{grn_seq}");

        for line in &delivery.lines {
            ledger.append(
                MovementRequest::new(
                    line.product_id,
                    delivery.warehouse_id,
                    delivery.bin_id,
                    TransactionType::RECEIPT,
                    line.quantity,
                    line.unit_cost,
                )
                .with_reference(ReferenceType::GoodsReceipt, grn_seq.clone()),
            )?;
        }

        let receipt = GoodsReceipt {
            id: GrnId(seq + 1),
            grn_no,
            po_id: order.id,
            po_no: order.po_no.clone(),
            received_date: delivery.received_date,
            warehouse_id: delivery.warehouse_id,
            bin_id: delivery.bin_id,
            lines: delivery.lines,
        };

        order.status = PurchaseOrderStatus::Received;

        tracing::info!(grn_no = %receipt.grn_no, po_no = %receipt.po_no, "goods receipt posted");
        receipts.push(receipt.clone());
        Ok(receipt)
    }

    pub fn order(&self, id: PurchaseOrderId) -> Option<PurchaseOrder> {
        self.orders.read().ok()?.iter().find(|o| o.id == id).cloned()
    }

    pub fn orders(&self) -> Vec<PurchaseOrder> {
        self.orders.read().map(|o| o.clone()).unwrap_or_default()
    }

    /// Orders still waiting on a delivery.
    pub fn pending_orders(&self) -> Vec<PurchaseOrder> {
        self.orders()
            .into_iter()
            .filter(|o| !o.is_received())
            .collect()
    }

    pub fn receipts(&self) -> Vec<GoodsReceipt> {
        self.receipts.read().map(|r| r.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_catalog::ProductId;

    fn po_line(product: u32, quantity: i64, unit_cost: i64) -> NewPoLine {
        NewPoLine {
            product_id: ProductId(product),
            product_name: format!("product {product}"),
            quantity,
            unit_cost,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn sent_order(desk: &PurchasingDesk) -> PurchaseOrder {
        desk.create_order(NewPurchaseOrder {
            supplier_id: PartyId(4),
            supplier_name: "TechParts Inc.".to_string(),
            order_date: date(1),
            expected_date: date(8),
            lines: vec![po_line(1, 10, 115_000), po_line(4, 20, 7_000)],
        })
        .unwrap()
    }

    #[test]
    fn order_totals_and_numbering() {
        let desk = PurchasingDesk::new();
        let order = sent_order(&desk);

        assert_eq!(order.po_no, "PO-1001");
        assert_eq!(order.subtotal, 1_290_000);
        assert_eq!(order.tax, 129_000);
        assert_eq!(order.total, 1_419_000);
        assert_eq!(desk.pending_orders().len(), 1);
    }

    #[test]
    fn receiving_posts_one_movement_per_line() {
        let desk = PurchasingDesk::new();
        let ledger = StockLedger::permissive();
        let order = sent_order(&desk);

        let receipt = desk
            .receive(
                &ledger,
                ReceiveDelivery {
                    po_id: order.id,
                    warehouse_id: WarehouseId(1),
                    bin_id: BinId(1),
                    received_date: date(7),
                    lines: vec![
                        GrnLine {
                            product_id: ProductId(1),
                            quantity: 10,
                            unit_cost: 115_000,
                        },
                        GrnLine {
                            product_id: ProductId(4),
                            quantity: 20,
                            unit_cost: 7_000,
                        },
                    ],
                },
            )
            .unwrap();

        assert_eq!(receipt.grn_no, "GRN-1001");
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.current_balance(ProductId(1), WarehouseId(1), BinId(1)),
            10
        );
        assert_eq!(
            ledger.current_balance(ProductId(4), WarehouseId(1), BinId(1)),
            20
        );
        let entries = ledger.entries();
        assert!(entries
            .iter()
            .all(|m| m.reference.as_ref().unwrap().to_string() == "GRN-1001"));

        assert!(desk.order(order.id).unwrap().is_received());
        assert!(desk.pending_orders().is_empty());
    }

    #[test]
    fn receive_rejects_unknown_and_double_receipt() {
        let desk = PurchasingDesk::new();
        let ledger = StockLedger::permissive();
        let order = sent_order(&desk);

        let delivery = ReceiveDelivery {
            po_id: order.id,
            warehouse_id: WarehouseId(1),
            bin_id: BinId(1),
            received_date: date(7),
            lines: vec![GrnLine {
                product_id: ProductId(1),
                quantity: 10,
                unit_cost: 115_000,
            }],
        };

        let missing = ReceiveDelivery {
            po_id: PurchaseOrderId(99),
            ..delivery.clone()
        };
        assert_eq!(
            desk.receive(&ledger, missing).unwrap_err(),
            PurchasingError::UnknownOrder(PurchaseOrderId(99))
        );

        desk.receive(&ledger, delivery.clone()).unwrap();
        assert_eq!(
            desk.receive(&ledger, delivery).unwrap_err(),
            PurchasingError::AlreadyReceived(order.id)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn referential_rejection_propagates_and_leaves_order_sent() {
        let desk = PurchasingDesk::new();
        // Empty catalog: every key is unknown.
        let ledger = StockLedger::new(std::sync::Arc::new(stockbook_catalog::Catalog::new()));
        let order = sent_order(&desk);

        let err = desk
            .receive(
                &ledger,
                ReceiveDelivery {
                    po_id: order.id,
                    warehouse_id: WarehouseId(1),
                    bin_id: BinId(1),
                    received_date: date(7),
                    lines: vec![GrnLine {
                        product_id: ProductId(1),
                        quantity: 10,
                        unit_cost: 115_000,
                    }],
                },
            )
            .unwrap_err();

        assert!(matches!(err, PurchasingError::Ledger(_)));
        assert!(ledger.is_empty());
        assert!(!desk.order(order.id).unwrap().is_received());
        assert!(desk.receipts().is_empty());
    }
}
