use std::sync::RwLock;

use chrono::NaiveDate;

use stockbook_core::{DomainError, DomainResult};
use stockbook_parties::{Party, PartyRole};

use crate::order::{
    CarrierSnapshot, CustomerSnapshot, OrderLine, OrderReturnStatus, OrderStatus, SalesOrder,
    SalesOrderId, ShippingStatus,
};
use crate::returns::{ReturnId, ReturnRequest, ReturnState};
use crate::shipment::{Shipment, ShipmentId};

/// Input line for a new order; totals are derived by the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: stockbook_catalog::ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: i64,
}

/// A new sales order. Document id/number and money totals are assigned
/// by the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: CustomerSnapshot,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub lines: Vec<NewOrderLine>,
}

/// A new return request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReturn {
    pub order_id: SalesOrderId,
    pub reason: String,
    pub created_on: NaiveDate,
}

/// In-memory store for sales documents.
///
/// Owns orders, shipments, and returns; every mutation goes through the
/// operations below so cross-document status syncing cannot be skipped.
#[derive(Debug, Default)]
pub struct SalesDesk {
    orders: RwLock<Vec<SalesOrder>>,
    shipments: RwLock<Vec<Shipment>>,
    returns: RwLock<Vec<ReturnRequest>>,
}

fn poisoned(_: impl core::fmt::Debug) -> DomainError {
    DomainError::invariant("sales store lock poisoned")
}

impl SalesDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new order. Numbers run SO-1001, SO-1002, ... in creation
    /// order; tax is 10% of the subtotal.
    pub fn create_order(&self, new: NewOrder) -> DomainResult<SalesOrder> {
        if new.lines.is_empty() {
            return Err(DomainError::validation("order must have lines"));
        }

        let mut orders = self.orders.write().map_err(poisoned)?;
        let seq = orders.len() as u32;

        let lines: Vec<OrderLine> = new
            .lines
            .into_iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.quantity * line.unit_price,
            })
            .collect();
        let subtotal: i64 = lines.iter().map(|l| l.line_total).sum();
        let tax = subtotal / 10;

        let order = SalesOrder {
            id: SalesOrderId(seq + 1),
            order_no: format!("SO-{:04}", 1001 + seq),
            customer: new.customer,
            order_date: new.order_date,
            status: new.status,
            lines,
            subtotal,
            tax,
            total: subtotal + tax,
            shipping_status: ShippingStatus::Pending,
            shipment_no: None,
            carrier: None,
            return_status: None,
        };

        tracing::info!(order_no = %order.order_no, total = order.total, "sales order created");
        orders.push(order.clone());
        Ok(order)
    }

    /// Create a shipment for an order and flip the order to Shipped.
    pub fn create_shipment(&self, order_id: SalesOrderId, carrier: &Party) -> DomainResult<Shipment> {
        let PartyRole::Carrier { flat_rate } = carrier.role else {
            return Err(DomainError::validation(format!(
                "party {} is not a carrier",
                carrier.id
            )));
        };

        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| DomainError::not_found(format!("sales order {order_id}")))?;

        let mut shipments = self.shipments.write().map_err(poisoned)?;
        let seq = shipments.len() as u32;
        let shipment = Shipment {
            id: ShipmentId(seq + 1),
            shipment_no: format!("SH-{:04}", 1001 + seq),
            order_id: order.id,
            order_no: order.order_no.clone(),
            customer: order.customer.clone(),
            carrier: CarrierSnapshot {
                carrier_id: carrier.id,
                name: carrier.name.clone(),
            },
            tracking_no: format!("TRK{:06}", 100_001 + seq),
            status: ShippingStatus::Pending,
            weight_grams: 5_000,
            cost: flat_rate,
            notes: String::new(),
        };

        order.shipping_status = ShippingStatus::Shipped;
        order.shipment_no = Some(shipment.shipment_no.clone());
        order.carrier = Some(shipment.carrier.clone());

        tracing::info!(
            shipment_no = %shipment.shipment_no,
            order_no = %shipment.order_no,
            carrier = %shipment.carrier.name,
            "shipment created"
        );
        shipments.push(shipment.clone());
        Ok(shipment)
    }

    /// Update a shipment's status and sync the parent order.
    pub fn update_shipment_status(
        &self,
        shipment_id: ShipmentId,
        status: ShippingStatus,
    ) -> DomainResult<Shipment> {
        let mut shipments = self.shipments.write().map_err(poisoned)?;
        let shipment = shipments
            .iter_mut()
            .find(|s| s.id == shipment_id)
            .ok_or_else(|| DomainError::not_found(format!("shipment {shipment_id}")))?;
        shipment.status = status;
        let updated = shipment.clone();
        drop(shipments);

        let mut orders = self.orders.write().map_err(poisoned)?;
        if let Some(order) = orders.iter_mut().find(|o| o.id == updated.order_id) {
            order.shipping_status = status;
        }

        Ok(updated)
    }

    /// Record a return request and mark the order Returned.
    pub fn create_return(&self, new: NewReturn) -> DomainResult<ReturnRequest> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == new.order_id)
            .ok_or_else(|| DomainError::not_found(format!("sales order {}", new.order_id)))?;

        let mut returns = self.returns.write().map_err(poisoned)?;
        let seq = returns.len() as u32;
        let request = ReturnRequest {
            id: ReturnId(seq + 1),
            return_no: format!("RT-{:04}", 1001 + seq),
            order_id: order.id,
            order_no: order.order_no.clone(),
            reason: new.reason,
            state: ReturnState::Pending,
            created_on: new.created_on,
        };

        order.return_status = Some(OrderReturnStatus::Returned);

        tracing::info!(return_no = %request.return_no, order_no = %request.order_no, "return created");
        returns.push(request.clone());
        Ok(request)
    }

    /// Advance a return's state; a refund syncs the parent order.
    pub fn update_return_status(
        &self,
        return_id: ReturnId,
        state: ReturnState,
    ) -> DomainResult<ReturnRequest> {
        let mut returns = self.returns.write().map_err(poisoned)?;
        let request = returns
            .iter_mut()
            .find(|r| r.id == return_id)
            .ok_or_else(|| DomainError::not_found(format!("return {return_id}")))?;
        request.state = state;
        let updated = request.clone();
        drop(returns);

        if state == ReturnState::Refunded {
            let mut orders = self.orders.write().map_err(poisoned)?;
            if let Some(order) = orders.iter_mut().find(|o| o.id == updated.order_id) {
                order.return_status = Some(OrderReturnStatus::Refunded);
            }
        }

        Ok(updated)
    }

    pub fn order(&self, id: SalesOrderId) -> Option<SalesOrder> {
        self.orders.read().ok()?.iter().find(|o| o.id == id).cloned()
    }

    pub fn orders(&self) -> Vec<SalesOrder> {
        self.orders.read().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn shipments(&self) -> Vec<Shipment> {
        self.shipments.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn returns(&self) -> Vec<ReturnRequest> {
        self.returns.read().map(|r| r.clone()).unwrap_or_default()
    }
}
