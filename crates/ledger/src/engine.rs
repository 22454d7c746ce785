use std::sync::{Arc, RwLock};

use chrono::Utc;
use thiserror::Error;

use stockbook_catalog::{BinId, ProductId, ReferenceLookup, WarehouseId};

use crate::movement::{
    Direction, LocationKey, MovementId, MovementRequest, StockMovement,
};

/// Error raised by ledger operations. Every variant leaves the ledger
/// unchanged; rejections are recoverable at the call site.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The movement would drive the key's balance below zero.
    #[error("insufficient stock for {key}: requested {requested}, balance would be {resulting}")]
    InsufficientStock {
        key: LocationKey,
        requested: i64,
        resulting: i64,
    },

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("unknown warehouse {0}")]
    UnknownWarehouse(WarehouseId),

    #[error("unknown bin {0}")]
    UnknownBin(BinId),

    #[error("bin {bin_id} does not belong to warehouse {warehouse_id}")]
    BinNotInWarehouse {
        bin_id: BinId,
        warehouse_id: WarehouseId,
    },

    /// Internal state lock poisoned by a panicking writer.
    #[error("ledger state lock poisoned")]
    Poisoned,
}

/// The perpetual-inventory engine.
///
/// Owns the append-only movement history and guards the one invariant of
/// the system: no (product, warehouse, bin) balance ever goes negative.
/// Shared by reference from the composition root; all mutation goes
/// through [`StockLedger::append`] / [`StockLedger::seed`].
pub struct StockLedger {
    refs: Arc<dyn ReferenceLookup>,
    entries: RwLock<Vec<StockMovement>>,
}

impl StockLedger {
    pub fn new(refs: Arc<dyn ReferenceLookup>) -> Self {
        Self {
            refs,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// A ledger with no master data attached: every key passes the
    /// referential check. Tests and throwaway embeddings.
    pub fn permissive() -> Self {
        Self::new(Arc::new(stockbook_catalog::AllowAll))
    }

    /// Net on-hand for an exact (product, warehouse, bin) key: the sum of
    /// `quantity_in - quantity_out` over the full history. 0 for a key
    /// with no movements.
    pub fn current_balance(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        bin_id: BinId,
    ) -> i64 {
        let key = LocationKey::new(product_id, warehouse_id, bin_id);
        match self.entries.read() {
            Ok(entries) => Self::balance_of(&entries, key),
            Err(_) => 0,
        }
    }

    fn balance_of(entries: &[StockMovement], key: LocationKey) -> i64 {
        entries
            .iter()
            .filter(|m| m.key() == key)
            .map(StockMovement::signed_quantity)
            .sum()
    }

    fn check_key(&self, request: &MovementRequest) -> Result<(), LedgerError> {
        if !self.refs.has_product(request.product_id) {
            return Err(LedgerError::UnknownProduct(request.product_id));
        }
        if !self.refs.has_warehouse(request.warehouse_id) {
            return Err(LedgerError::UnknownWarehouse(request.warehouse_id));
        }
        if !self.refs.has_bin(request.bin_id) {
            return Err(LedgerError::UnknownBin(request.bin_id));
        }
        if !self
            .refs
            .bin_in_warehouse(request.bin_id, request.warehouse_id)
        {
            return Err(LedgerError::BinNotInWarehouse {
                bin_id: request.bin_id,
                warehouse_id: request.warehouse_id,
            });
        }
        Ok(())
    }

    /// Validate and record one movement.
    ///
    /// Holds the write lock across the whole read-validate-append
    /// sequence, so the balance read can never be stale relative to a
    /// concurrently accepted movement for the same key.
    pub fn append(&self, request: MovementRequest) -> Result<StockMovement, LedgerError> {
        self.check_key(&request)?;

        let key = request.key();
        let mut entries = self.entries.write().map_err(|_| LedgerError::Poisoned)?;

        let prior = Self::balance_of(&entries, key);
        let proposed = match request.transaction_type.direction {
            Direction::Inbound => prior + request.quantity,
            Direction::Outbound => prior - request.quantity,
        };

        if proposed < 0 {
            return Err(LedgerError::InsufficientStock {
                key,
                requested: request.quantity,
                resulting: proposed,
            });
        }

        let (quantity_in, quantity_out) = match request.transaction_type.direction {
            Direction::Inbound => (request.quantity, 0),
            Direction::Outbound => (0, request.quantity),
        };

        let movement = StockMovement {
            id: MovementId::next(),
            product_id: request.product_id,
            warehouse_id: request.warehouse_id,
            bin_id: request.bin_id,
            transaction_type: request.transaction_type,
            quantity_in,
            quantity_out,
            balance_after: proposed,
            unit_cost: request.unit_cost,
            reference: request.reference,
            batch_number: request.batch_number,
            expiry_date: request.expiry_date,
            created_at: Utc::now(),
        };

        entries.push(movement.clone());
        tracing::debug!(
            key = %key,
            tag = movement.transaction_type.label(),
            balance = proposed,
            "movement recorded"
        );
        Ok(movement)
    }

    /// Apply a fixture sequence in order, dropping rejected requests.
    ///
    /// Skips are logged and swallowed so seed data can end with an
    /// intentionally invalid entry to demonstrate the negative-stock
    /// guard. Interactive callers must use [`StockLedger::append`], which
    /// always surfaces rejections.
    pub fn seed(&self, requests: impl IntoIterator<Item = MovementRequest>) -> Vec<StockMovement> {
        requests
            .into_iter()
            .filter_map(|request| match self.append(request) {
                Ok(movement) => Some(movement),
                Err(err) => {
                    tracing::warn!(error = %err, "seed request skipped");
                    None
                }
            })
            .collect()
    }

    /// Snapshot of the full history in insertion order.
    pub fn entries(&self) -> Vec<StockMovement> {
        self.entries.read().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for StockLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StockLedger")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}
