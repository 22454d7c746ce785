use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_catalog::{BinId, ProductId, WarehouseId};
use stockbook_core::Entity;
use stockbook_parties::PartyId;

/// Purchase order identifier (store-assigned, sequential).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PurchaseOrderId(pub u32);

impl core::fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Goods-received note identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GrnId(pub u32);

impl core::fmt::Display for GrnId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Purchase order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Sent,
    Received,
}

/// Purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    /// Unit cost in cents.
    pub unit_cost: i64,
    pub line_total: i64,
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub po_no: String,
    pub supplier_id: PartyId,
    pub supplier_name: String,
    pub order_date: NaiveDate,
    pub expected_date: NaiveDate,
    pub status: PurchaseOrderStatus,
    pub lines: Vec<PoLine>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl PurchaseOrder {
    pub fn is_received(&self) -> bool {
        self.status == PurchaseOrderStatus::Received
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One received line on a goods-received note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrnLine {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit cost in cents, as invoiced on arrival.
    pub unit_cost: i64,
}

/// Goods-received note: the receipt event that posts inbound movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceipt {
    pub id: GrnId,
    pub grn_no: String,
    pub po_id: PurchaseOrderId,
    pub po_no: String,
    pub received_date: NaiveDate,
    pub warehouse_id: WarehouseId,
    pub bin_id: BinId,
    pub lines: Vec<GrnLine>,
}

impl Entity for GoodsReceipt {
    type Id = GrnId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
