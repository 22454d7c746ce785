use serde::{Deserialize, Serialize};

use stockbook_core::Entity;

use crate::order::{CarrierSnapshot, CustomerSnapshot, SalesOrderId, ShippingStatus};

/// Shipment identifier (store-assigned, sequential).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShipmentId(pub u32);

impl core::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A physical shipment created from a sales order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub shipment_no: String,
    pub order_id: SalesOrderId,
    pub order_no: String,
    pub customer: CustomerSnapshot,
    pub carrier: CarrierSnapshot,
    pub tracking_no: String,
    pub status: ShippingStatus,
    pub weight_grams: u32,
    /// Shipping cost in cents.
    pub cost: i64,
    pub notes: String,
}

impl Entity for Shipment {
    type Id = ShipmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
