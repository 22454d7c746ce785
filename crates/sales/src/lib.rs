//! Sales orders, shipments, and customer returns.
//!
//! Documents are CRUD records with status lifecycles; creating a
//! shipment or return also syncs the parent order's status fields. The
//! stock ledger is not touched here: issuing stock against an order is a
//! separate ledger movement posted by the caller.

pub mod desk;
pub mod order;
pub mod returns;
pub mod shipment;

pub use desk::{NewOrder, NewOrderLine, NewReturn, SalesDesk};
pub use order::{
    CarrierSnapshot, CustomerSnapshot, OrderLine, OrderReturnStatus, OrderStatus, SalesOrder,
    SalesOrderId, ShippingStatus,
};
pub use returns::{ReturnId, ReturnRequest, ReturnState};
pub use shipment::{Shipment, ShipmentId};
