//! Expense ledger
//!
//! The event/expense document model the timeline operates over, plus the
//! reductions the expense lists feed:
//! - JSON document persistence with format versioning
//! - currency normalization against an injected rate table
//! - per-participant balance computation
//! - greedy settlement suggestions

pub mod balance;
pub mod currency;
pub mod document;
pub mod settlement;
pub mod types;

pub use balance::compute_balances;
pub use currency::ExchangeRates;
pub use document::EventDocument;
pub use settlement::SettlementPlanner;
pub use types::{EventInfo, Expense};
