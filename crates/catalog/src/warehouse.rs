use serde::{Deserialize, Serialize};

use stockbook_core::Entity;

/// Warehouse identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WarehouseId(pub u32);

impl core::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for WarehouseId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Bin identifier. A bin belongs to exactly one warehouse.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BinId(pub u32);

impl core::fmt::Display for BinId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for BinId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Warehouse master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub code: String,
    pub name: String,
    pub address: String,
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Storage bin inside a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: BinId,
    pub warehouse_id: WarehouseId,
    pub code: String,
    pub zone: String,
}

impl Entity for Bin {
    type Id = BinId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
