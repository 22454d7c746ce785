use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_catalog::ProductId;
use stockbook_core::Entity;
use stockbook_parties::PartyId;

/// Sales order identifier (store-assigned, sequential).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SalesOrderId(pub u32);

impl core::fmt::Display for SalesOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Sales order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

/// Where the order's physical shipment currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    Pending,
    Shipped,
    InTransit,
    Delivered,
    Cancelled,
}

/// Return progress mirrored onto the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderReturnStatus {
    Returned,
    Refunded,
}

/// Customer data captured at order time. Party edits never rewrite
/// existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer_id: PartyId,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Carrier data captured when a shipment is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSnapshot {
    pub carrier_id: PartyId,
    pub name: String,
}

/// One order line. `line_total` is derived at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in cents.
    pub unit_price: i64,
    pub line_total: i64,
}

/// A customer sales order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: SalesOrderId,
    pub order_no: String,
    pub customer: CustomerSnapshot,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    /// Amounts in cents; tax is 10% of subtotal, rounded down.
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    pub shipping_status: ShippingStatus,
    pub shipment_no: Option<String>,
    pub carrier: Option<CarrierSnapshot>,
    pub return_status: Option<OrderReturnStatus>,
}

impl Entity for SalesOrder {
    type Id = SalesOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
