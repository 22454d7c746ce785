use std::collections::HashMap;
use std::sync::RwLock;

use stockbook_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};
use crate::warehouse::{Bin, BinId, Warehouse, WarehouseId};

/// Read-side seam the stock ledger validates movement keys against.
///
/// The ledger only ever asks existence/containment questions; it never
/// reads product attributes, so this trait stays deliberately narrow.
pub trait ReferenceLookup: Send + Sync {
    fn has_product(&self, id: ProductId) -> bool;
    fn has_warehouse(&self, id: WarehouseId) -> bool;
    fn has_bin(&self, id: BinId) -> bool;
    fn bin_in_warehouse(&self, bin: BinId, warehouse: WarehouseId) -> bool;
}

/// Lookup that accepts every key.
///
/// Restores the permissive behavior of a ledger with no master data
/// attached; used by tests and throwaway embeddings.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl ReferenceLookup for AllowAll {
    fn has_product(&self, _id: ProductId) -> bool {
        true
    }

    fn has_warehouse(&self, _id: WarehouseId) -> bool {
        true
    }

    fn has_bin(&self, _id: BinId) -> bool {
        true
    }

    fn bin_in_warehouse(&self, _bin: BinId, _warehouse: WarehouseId) -> bool {
        true
    }
}

/// In-memory master-data store.
///
/// Owned by the composition root and shared by reference. Mutation goes
/// through the typed operations below; callers never splice collections
/// directly.
#[derive(Debug, Default)]
pub struct Catalog {
    products: RwLock<HashMap<ProductId, Product>>,
    warehouses: RwLock<HashMap<WarehouseId, Warehouse>>,
    bins: RwLock<HashMap<BinId, Bin>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_product(&self, product: Product) {
        tracing::debug!(id = %product.id, sku = %product.sku, "catalog product upsert");
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product);
        }
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.products.read().ok()?.get(&id).cloned()
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        let map = match self.products.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Product> = map.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    pub fn upsert_warehouse(&self, warehouse: Warehouse) {
        tracing::debug!(id = %warehouse.id, code = %warehouse.code, "catalog warehouse upsert");
        if let Ok(mut map) = self.warehouses.write() {
            map.insert(warehouse.id, warehouse);
        }
    }

    pub fn warehouse(&self, id: WarehouseId) -> Option<Warehouse> {
        self.warehouses.read().ok()?.get(&id).cloned()
    }

    pub fn warehouses(&self) -> Vec<Warehouse> {
        let map = match self.warehouses.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Warehouse> = map.values().cloned().collect();
        all.sort_by_key(|w| w.id);
        all
    }

    /// Register a bin. The owning warehouse must already exist.
    pub fn add_bin(&self, bin: Bin) -> DomainResult<()> {
        if !self.has_warehouse(bin.warehouse_id) {
            return Err(DomainError::not_found(format!(
                "warehouse {} for bin {}",
                bin.warehouse_id, bin.id
            )));
        }
        tracing::debug!(id = %bin.id, warehouse = %bin.warehouse_id, code = %bin.code, "catalog bin added");
        if let Ok(mut map) = self.bins.write() {
            map.insert(bin.id, bin);
        }
        Ok(())
    }

    pub fn bin(&self, id: BinId) -> Option<Bin> {
        self.bins.read().ok()?.get(&id).cloned()
    }

    pub fn bins(&self) -> Vec<Bin> {
        let map = match self.bins.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Bin> = map.values().cloned().collect();
        all.sort_by_key(|b| b.id);
        all
    }

    /// Bins belonging to one warehouse, ordered by id.
    pub fn bins_in(&self, warehouse: WarehouseId) -> Vec<Bin> {
        let mut all: Vec<Bin> = self
            .bins()
            .into_iter()
            .filter(|b| b.warehouse_id == warehouse)
            .collect();
        all.sort_by_key(|b| b.id);
        all
    }
}

impl ReferenceLookup for Catalog {
    fn has_product(&self, id: ProductId) -> bool {
        self.products.read().map(|m| m.contains_key(&id)).unwrap_or(false)
    }

    fn has_warehouse(&self, id: WarehouseId) -> bool {
        self.warehouses
            .read()
            .map(|m| m.contains_key(&id))
            .unwrap_or(false)
    }

    fn has_bin(&self, id: BinId) -> bool {
        self.bins.read().map(|m| m.contains_key(&id)).unwrap_or(false)
    }

    fn bin_in_warehouse(&self, bin: BinId, warehouse: WarehouseId) -> bool {
        self.bin(bin).is_some_and(|b| b.warehouse_id == warehouse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: u32, code: &str) -> Warehouse {
        Warehouse {
            id: WarehouseId(id),
            code: code.to_string(),
            name: format!("Warehouse {code}"),
            address: String::new(),
        }
    }

    fn bin(id: u32, warehouse_id: u32, code: &str) -> Bin {
        Bin {
            id: BinId(id),
            warehouse_id: WarehouseId(warehouse_id),
            code: code.to_string(),
            zone: code[..1].to_string(),
        }
    }

    #[test]
    fn add_bin_requires_existing_warehouse() {
        let catalog = Catalog::new();
        let err = catalog.add_bin(bin(1, 1, "A1")).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        catalog.upsert_warehouse(warehouse(1, "WH1"));
        catalog.add_bin(bin(1, 1, "A1")).unwrap();
        assert_eq!(catalog.bins_in(WarehouseId(1)).len(), 1);
    }

    #[test]
    fn bin_in_warehouse_checks_ownership() {
        let catalog = Catalog::new();
        catalog.upsert_warehouse(warehouse(1, "WH1"));
        catalog.upsert_warehouse(warehouse(2, "WH2"));
        catalog.add_bin(bin(1, 1, "A1")).unwrap();
        catalog.add_bin(bin(4, 2, "C1")).unwrap();

        assert!(catalog.bin_in_warehouse(BinId(1), WarehouseId(1)));
        assert!(!catalog.bin_in_warehouse(BinId(1), WarehouseId(2)));
        assert!(!catalog.bin_in_warehouse(BinId(9), WarehouseId(1)));
    }

    #[test]
    fn allow_all_accepts_anything() {
        assert!(AllowAll.has_product(ProductId(999)));
        assert!(AllowAll.bin_in_warehouse(BinId(1), WarehouseId(42)));
    }
}
