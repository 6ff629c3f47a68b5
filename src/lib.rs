//! # JustSplit Core
//!
//! The computational core of the JustSplit expense-splitting application:
//! timeline layout for dated expenses, plus the ledger math (currency
//! normalization, balances, settlement suggestions) the expense lists feed.
//!
//! ## Overview
//!
//! An event owns a `[start, end?]` time window and a list of dated
//! expenses. The timeline layer maps each expense onto a normalized
//! percent axis and folds nearby positions into clusters so the rendering
//! layer draws one marker per cluster instead of a pile of overlapping
//! dots. The ledger layer reduces the same expenses into per-participant
//! balances and a short list of settlement transfers.
//!
//! ## Quick Start
//!
//! ```
//! use justsplit_core::{EventBounds, FixedClock, LayoutEngine, TimedItem};
//!
//! let bounds = EventBounds::new("2025-07-01", Some("2025-07-10"));
//! let items = vec![
//!     TimedItem::new("dinner", "2025-07-02"),
//!     TimedItem::new("taxi", "2025-07-02T06:00:00Z"),
//!     TimedItem::new("museum", "2025-07-08"),
//! ];
//!
//! let engine = LayoutEngine::new();
//! let clock = FixedClock::from_timestamp("2025-07-09T12:00:00Z");
//! let markers = engine.layout(&items, &bounds, &clock);
//!
//! // The two July 2nd expenses land within the default threshold and
//! // merge into one badge.
//! assert_eq!(markers.len(), 2);
//! assert_eq!(markers[0].count, 2);
//! assert_eq!(markers.iter().map(|m| m.count).sum::<usize>(), 3);
//! ```
//!
//! ## Architecture
//!
//! - [`time`]: epoch-millisecond timestamps with an injectable wall clock
//! - [`timeline`]: position mapping and proximity grouping
//! - [`ledger`]: event documents, currency conversion, balances, settlement
//! - [`app`]: CLI and configuration management
//!
//! ## Layout Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Event     │───▶│  Position   │───▶│  Proximity  │───▶│   Markers   │
//! │  Document   │    │   Mapper    │    │   Grouper   │    │  (+ badges) │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! The whole pipeline is synchronous and side-effect-free: every call
//! rebuilds its clusters from scratch against a single "now" snapshot, so
//! repeated invocations (e.g. once per render) are safe and cheap.

pub mod app;
pub mod ledger;
pub mod time;
pub mod timeline;

// Re-export commonly used types
pub use ledger::balance::{compute_balances, Balance};
pub use ledger::currency::ExchangeRates;
pub use ledger::document::EventDocument;
pub use ledger::settlement::{SettlementConfig, SettlementPlanner, Transfer};
pub use ledger::types::{EventInfo, Expense};
pub use time::clock::{Clock, FixedClock, SystemClock};
pub use timeline::grouping::{GroupingConfig, ProximityGrouper};
pub use timeline::layout::LayoutEngine;
pub use timeline::position::PositionMapper;
pub use timeline::types::{Cluster, EventBounds, Marker, TimedItem};

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Currency error: {0}")]
    Currency(String),

    #[error("Settlement error: {0}")]
    Settlement(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
