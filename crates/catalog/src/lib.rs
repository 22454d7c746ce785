//! Reference master data the stock ledger indexes by.
//!
//! Products, warehouses, and bins are static reference records with no
//! lifecycle logic of their own; the ledger treats them as keys and
//! validates movement requests against the [`ReferenceLookup`] seam.

pub mod product;
pub mod store;
pub mod warehouse;

pub use product::{Product, ProductId};
pub use store::{AllowAll, Catalog, ReferenceLookup};
pub use warehouse::{Bin, BinId, Warehouse, WarehouseId};
