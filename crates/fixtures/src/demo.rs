use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use stockbook_catalog::{Catalog, ProductId};
use stockbook_core::DomainError;
use stockbook_ledger::StockLedger;
use stockbook_parties::{PartyDirectory, PartyId};
use stockbook_purchasing::{NewPoLine, NewPurchaseOrder, PurchasingDesk, PurchasingError};
use stockbook_sales::SalesDesk;

use crate::seed::{canonical_movements, seed_catalog, seed_demo_orders, seed_parties};

/// Seeding failure. Only reachable if the canonical dataset is edited
/// into an inconsistent state.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Purchasing(#[from] PurchasingError),
}

/// A fully seeded in-memory system: the composition root's store set.
///
/// The catalog doubles as the ledger's reference lookup, so movements
/// against unseeded keys are rejected everywhere in the demo.
pub struct DemoSystem {
    pub catalog: Arc<Catalog>,
    pub parties: PartyDirectory,
    pub ledger: StockLedger,
    pub sales: SalesDesk,
    pub purchasing: PurchasingDesk,
}

impl DemoSystem {
    pub fn build() -> Result<Self, FixtureError> {
        let catalog = Arc::new(Catalog::new());
        seed_catalog(&catalog)?;

        let parties = PartyDirectory::new();
        seed_parties(&parties);

        let ledger = StockLedger::new(catalog.clone());
        ledger.seed(canonical_movements());

        let sales = SalesDesk::new();
        seed_demo_orders(&sales, &parties, &catalog)?;

        // One purchase order still waiting on its delivery.
        let purchasing = PurchasingDesk::new();
        purchasing.create_order(NewPurchaseOrder {
            supplier_id: PartyId(4),
            supplier_name: "TechParts Inc.".to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            expected_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap_or_default(),
            lines: vec![
                NewPoLine {
                    product_id: ProductId(1),
                    product_name: "Laptop Pro 16\"".to_string(),
                    quantity: 10,
                    unit_cost: 115_000,
                },
                NewPoLine {
                    product_id: ProductId(4),
                    product_name: "Gaming Mouse".to_string(),
                    quantity: 20,
                    unit_cost: 7_000,
                },
            ],
        })?;

        Ok(Self {
            catalog,
            parties,
            ledger,
            sales,
            purchasing,
        })
    }
}
