//! JSON snapshot of the movement history.
//!
//! The snapshot is a plain JSON array of movements, suitable for handing
//! to whatever the embedding application uses as storage. Producing and
//! parsing the string is in scope; reading or writing anything durable
//! is not.

use stockbook_ledger::StockMovement;

pub fn ledger_snapshot(entries: &[StockMovement]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

pub fn parse_snapshot(snapshot: &str) -> serde_json::Result<Vec<StockMovement>> {
    serde_json::from_str(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_ledger::{MovementRequest, ReferenceType, StockLedger, TransactionType};

    #[test]
    fn snapshot_preserves_the_full_history() {
        let ledger = StockLedger::permissive();
        ledger
            .append(
                MovementRequest::new(1u32, 1u32, 1u32, TransactionType::RECEIPT, 25, 1200)
                    .with_reference(ReferenceType::GoodsReceipt, "101"),
            )
            .unwrap();
        ledger
            .append(MovementRequest::new(
                1u32,
                1u32,
                1u32,
                TransactionType::ISSUE,
                8,
                1200,
            ))
            .unwrap();

        let entries = ledger.entries();
        let snapshot = ledger_snapshot(&entries).unwrap();
        let restored = parse_snapshot(&snapshot).unwrap();
        assert_eq!(restored, entries);
    }
}
