//! Deterministic demo dataset.
//!
//! Seeds the catalog, parties, ledger, and document stores with the
//! canonical fixture data. Everything here is index arithmetic over
//! fixed tables — no randomness — so two builds of the demo system
//! agree on every number.

mod demo;
mod integration_tests;
pub mod seed;

pub use demo::{DemoSystem, FixtureError};
pub use seed::{canonical_movements, seed_catalog, seed_demo_orders, seed_parties};
