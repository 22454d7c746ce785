use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockbook_core::Entity;

use crate::order::SalesOrderId;

/// Return identifier (store-assigned, sequential).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReturnId(pub u32);

impl core::fmt::Display for ReturnId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Return request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnState {
    Pending,
    Approved,
    Refunded,
    Rejected,
}

/// A customer return request against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub id: ReturnId,
    pub return_no: String,
    pub order_id: SalesOrderId,
    pub order_no: String,
    pub reason: String,
    pub state: ReturnState,
    pub created_on: NaiveDate,
}

impl Entity for ReturnRequest {
    type Id = ReturnId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
