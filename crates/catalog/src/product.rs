use serde::{Deserialize, Serialize};

use stockbook_core::Entity;

/// Product identifier: the small numeric key of the master data.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Product master record.
///
/// Prices are in the smallest currency unit (cents). `reorder_point`
/// feeds the ledger's reorder sweep; `batch_tracked` controls whether
/// movements for this product carry batch/expiry data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub uom: String,
    pub cost_price: i64,
    pub selling_price: i64,
    pub min_stock: i64,
    pub reorder_point: i64,
    pub batch_tracked: bool,
    pub serial_tracked: bool,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
