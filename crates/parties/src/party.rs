use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use stockbook_core::Entity;

/// Party identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartyId(pub u32);

impl core::fmt::Display for PartyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for PartyId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Party status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    Active,
    Inactive,
}

/// Contact information for a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Role-specific commercial data. The role doubles as the party kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Customer,
    Supplier {
        lead_time_days: u32,
        /// Rating in tenths (48 = 4.8 of 5).
        rating_tenths: u8,
    },
    Carrier {
        /// Flat shipping rate in cents.
        flat_rate: i64,
    },
}

/// A customer, supplier, or carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub contact: ContactInfo,
    pub role: PartyRole,
    pub status: PartyStatus,
}

impl Party {
    pub fn is_customer(&self) -> bool {
        matches!(self.role, PartyRole::Customer)
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self.role, PartyRole::Supplier { .. })
    }

    pub fn is_carrier(&self) -> bool {
        matches!(self.role, PartyRole::Carrier { .. })
    }
}

impl Entity for Party {
    type Id = PartyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// In-memory party store, shared by reference from the composition root.
#[derive(Debug, Default)]
pub struct PartyDirectory {
    inner: RwLock<HashMap<PartyId, Party>>,
}

impl PartyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, party: Party) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(party.id, party);
        }
    }

    pub fn get(&self, id: PartyId) -> Option<Party> {
        self.inner.read().ok()?.get(&id).cloned()
    }

    fn filtered(&self, keep: impl Fn(&Party) -> bool) -> Vec<Party> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut all: Vec<Party> = map.values().filter(|p| keep(p)).cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    pub fn customers(&self) -> Vec<Party> {
        self.filtered(Party::is_customer)
    }

    pub fn suppliers(&self) -> Vec<Party> {
        self.filtered(Party::is_supplier)
    }

    pub fn carriers(&self) -> Vec<Party> {
        self.filtered(Party::is_carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: u32, name: &str) -> Party {
        Party {
            id: PartyId(id),
            name: name.to_string(),
            contact: ContactInfo::default(),
            role: PartyRole::Customer,
            status: PartyStatus::Active,
        }
    }

    #[test]
    fn directory_filters_by_role() {
        let directory = PartyDirectory::new();
        directory.upsert(customer(2, "Beta Systems"));
        directory.upsert(customer(1, "Acme Corp"));
        directory.upsert(Party {
            id: PartyId(10),
            name: "FedEx".to_string(),
            contact: ContactInfo::default(),
            role: PartyRole::Carrier { flat_rate: 1500 },
            status: PartyStatus::Active,
        });

        let customers = directory.customers();
        assert_eq!(customers.len(), 2);
        // Ordered by id regardless of insertion order.
        assert_eq!(customers[0].name, "Acme Corp");
        assert_eq!(directory.carriers().len(), 1);
        assert!(directory.suppliers().is_empty());
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let directory = PartyDirectory::new();
        directory.upsert(customer(1, "Acme Corp"));
        directory.upsert(customer(1, "Acme Corporation"));
        assert_eq!(directory.get(PartyId(1)).unwrap().name, "Acme Corporation");
    }
}
