use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockbook_catalog::{BinId, ProductId, WarehouseId};
use stockbook_core::{DomainError, Entity};

/// Ledger entry identifier.
///
/// UUIDv7: unique and time-ordered. The ledger never relies on id order,
/// though; insertion order is authoritative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(Uuid);

impl MovementId {
    pub(crate) fn next() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for MovementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Which way a movement moves stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Business reason for a movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementReason {
    Receipt,
    Issue,
    Return,
    Transfer,
    Adjustment,
}

/// Movement classification.
///
/// Direction is a first-class field; the rendered tag is a display label
/// only and is never parsed to decide which way stock moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionType {
    pub direction: Direction,
    pub reason: MovementReason,
}

impl TransactionType {
    /// Goods received (GRN posting).
    pub const RECEIPT: Self = Self {
        direction: Direction::Inbound,
        reason: MovementReason::Receipt,
    };

    /// Stock issued against a sales order.
    pub const ISSUE: Self = Self {
        direction: Direction::Outbound,
        reason: MovementReason::Issue,
    };

    /// Customer return put back on hand.
    pub const CUSTOMER_RETURN: Self = Self {
        direction: Direction::Inbound,
        reason: MovementReason::Return,
    };

    pub fn new(direction: Direction, reason: MovementReason) -> Self {
        Self { direction, reason }
    }

    pub fn is_inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }

    /// Legacy display tag, kept for exports and logs.
    pub fn label(&self) -> &'static str {
        match (self.reason, self.direction) {
            (MovementReason::Receipt, Direction::Inbound) => "receipt_in",
            (MovementReason::Receipt, Direction::Outbound) => "receipt_out",
            (MovementReason::Issue, Direction::Inbound) => "issue_in",
            (MovementReason::Issue, Direction::Outbound) => "issue_out",
            (MovementReason::Return, Direction::Inbound) => "return_in",
            (MovementReason::Return, Direction::Outbound) => "return_out",
            (MovementReason::Transfer, Direction::Inbound) => "transfer_in",
            (MovementReason::Transfer, Direction::Outbound) => "transfer_out",
            (MovementReason::Adjustment, Direction::Inbound) => "adjust_in",
            (MovementReason::Adjustment, Direction::Outbound) => "adjust_out",
        }
    }

    /// Map a legacy tag back to the closed classification.
    ///
    /// Exact match only. The bare `in`, `issue`, and `return` tags of the
    /// old transaction forms are accepted; anything else is a validation
    /// error rather than a substring guess.
    pub fn parse_label(label: &str) -> Result<Self, DomainError> {
        let parsed = match label {
            "receipt_in" | "in" => Self::RECEIPT,
            "issue_out" | "issue" | "out" => Self::ISSUE,
            "return_in" | "return" => Self::CUSTOMER_RETURN,
            "transfer_in" => Self::new(Direction::Inbound, MovementReason::Transfer),
            "transfer_out" => Self::new(Direction::Outbound, MovementReason::Transfer),
            "adjust_in" => Self::new(Direction::Inbound, MovementReason::Adjustment),
            "adjust_out" => Self::new(Direction::Outbound, MovementReason::Adjustment),
            other => {
                return Err(DomainError::validation(format!(
                    "unknown transaction type label: {other}"
                )));
            }
        };
        Ok(parsed)
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Document family a movement's provenance points at. Informational only;
/// the ledger never interprets it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    #[serde(rename = "GRN")]
    GoodsReceipt,
    #[serde(rename = "SO")]
    SalesOrder,
    #[serde(rename = "RT")]
    Return,
    #[serde(rename = "TRF")]
    Transfer,
    #[serde(rename = "ADJ")]
    Adjustment,
}

impl core::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tag = match self {
            ReferenceType::GoodsReceipt => "GRN",
            ReferenceType::SalesOrder => "SO",
            ReferenceType::Return => "RT",
            ReferenceType::Transfer => "TRF",
            ReferenceType::Adjustment => "ADJ",
        };
        f.write_str(tag)
    }
}

/// Free-form provenance pointer (e.g. GRN-1001).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub doc_type: ReferenceType,
    pub doc_id: String,
}

impl Reference {
    pub fn new(doc_type: ReferenceType, doc_id: impl Into<String>) -> Self {
        Self {
            doc_type,
            doc_id: doc_id.into(),
        }
    }
}

impl core::fmt::Display for Reference {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.doc_type, self.doc_id)
    }
}

/// Composite key the ledger balances by.
///
/// Balance queries are exact-key only; aggregating across bins or
/// warehouses is the caller's business.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LocationKey {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub bin_id: BinId,
}

impl LocationKey {
    pub fn new(product_id: ProductId, warehouse_id: WarehouseId, bin_id: BinId) -> Self {
        Self {
            product_id,
            warehouse_id,
            bin_id,
        }
    }
}

impl core::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "product {} / warehouse {} / bin {}",
            self.product_id, self.warehouse_id, self.bin_id
        )
    }
}

/// One immutable entry of the perpetual-inventory ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub bin_id: BinId,
    pub transaction_type: TransactionType,
    pub quantity_in: i64,
    pub quantity_out: i64,
    /// Running balance for this movement's key immediately after it
    /// applied. Computed by the ledger, never supplied by callers.
    pub balance_after: i64,
    /// Unit cost in cents. Valuation input; the balance gate ignores it.
    pub unit_cost: i64,
    pub reference: Option<Reference>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.product_id, self.warehouse_id, self.bin_id)
    }

    /// Signed contribution of this movement to its key's balance.
    pub fn signed_quantity(&self) -> i64 {
        self.quantity_in - self.quantity_out
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A proposed movement.
///
/// `id`, `balance_after`, and `created_at` are assigned by the ledger on
/// acceptance. Quantity is taken as-is: the ledger does not validate
/// positivity, only the resulting balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub bin_id: BinId,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub unit_cost: i64,
    pub reference: Option<Reference>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl MovementRequest {
    pub fn new(
        product_id: impl Into<ProductId>,
        warehouse_id: impl Into<WarehouseId>,
        bin_id: impl Into<BinId>,
        transaction_type: TransactionType,
        quantity: i64,
        unit_cost: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            warehouse_id: warehouse_id.into(),
            bin_id: bin_id.into(),
            transaction_type,
            quantity,
            unit_cost,
            reference: None,
            batch_number: None,
            expiry_date: None,
        }
    }

    pub fn with_reference(mut self, doc_type: ReferenceType, doc_id: impl Into<String>) -> Self {
        self.reference = Some(Reference::new(doc_type, doc_id));
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>, expiry: Option<NaiveDate>) -> Self {
        self.batch_number = Some(batch.into());
        self.expiry_date = expiry;
        self
    }

    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.product_id, self.warehouse_id, self.bin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_exact_match() {
        for tt in [
            TransactionType::RECEIPT,
            TransactionType::ISSUE,
            TransactionType::CUSTOMER_RETURN,
            TransactionType::new(Direction::Inbound, MovementReason::Transfer),
            TransactionType::new(Direction::Outbound, MovementReason::Adjustment),
        ] {
            assert_eq!(TransactionType::parse_label(tt.label()).unwrap(), tt);
        }
    }

    #[test]
    fn bare_legacy_tags_map_unambiguously() {
        assert_eq!(
            TransactionType::parse_label("in").unwrap(),
            TransactionType::RECEIPT
        );
        assert_eq!(
            TransactionType::parse_label("issue").unwrap(),
            TransactionType::ISSUE
        );
        // Under the old substring rule "return" matched neither "in" nor
        // "out"; here it is a first-class inbound movement.
        let ret = TransactionType::parse_label("return").unwrap();
        assert_eq!(ret.direction, Direction::Inbound);
        assert_eq!(ret.reason, MovementReason::Return);
    }

    #[test]
    fn unknown_labels_are_rejected_not_guessed() {
        assert!(TransactionType::parse_label("cash_in_out").is_err());
        assert!(TransactionType::parse_label("").is_err());
    }
}
