//! Exports and dashboard figures derived from the ledger.
//!
//! Everything here renders strings or plain structs; writing files or
//! drawing screens is the embedding application's business.

pub mod csv;
pub mod dashboard;
pub mod snapshot;

pub use csv::{ledger_csv, stock_summary_csv, valuation_csv};
pub use dashboard::{dashboard_summary, DashboardSummary};
pub use snapshot::{ledger_snapshot, parse_snapshot};
