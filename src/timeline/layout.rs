//! Timeline Layout Pipeline
//!
//! Wires clock snapshotting, position mapping, and proximity grouping
//! into a single pass from dated items to renderable markers.

use tracing::debug;

use crate::ledger::document::EventDocument;
use crate::time::clock::Clock;
use crate::timeline::grouping::{GroupingConfig, ProximityGrouper};
use crate::timeline::position::PositionMapper;
use crate::timeline::types::{EventBounds, Marker, TimedItem};

/// Layout engine producing one marker per cluster.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    /// Grouping configuration
    pub config: GroupingConfig,
}

impl LayoutEngine {
    /// Create with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Lay out items against event bounds.
    ///
    /// The clock is sampled exactly once, so every item in the pass sees
    /// the same effective end for an ongoing event.
    pub fn layout(
        &self,
        items: &[TimedItem],
        bounds: &EventBounds,
        clock: &dyn Clock,
    ) -> Vec<Marker> {
        let mapper = PositionMapper::new(clock);
        let grouper = ProximityGrouper::with_config(self.config.clone());
        let clusters = grouper.group(items, bounds, &mapper);

        debug!(
            items = items.len(),
            clusters = clusters.len(),
            ongoing = bounds.is_ongoing(),
            "layout pass complete"
        );

        clusters.iter().map(Marker::from).collect()
    }

    /// Lay out a whole event document's expenses.
    pub fn layout_document(&self, document: &EventDocument, clock: &dyn Clock) -> Vec<Marker> {
        self.layout(&document.items(), &document.bounds(), clock)
    }
}
