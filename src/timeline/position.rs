//! Timeline Position Mapping
//!
//! Maps a timestamp onto a normalized percent axis relative to an event's
//! bounds. Items before the start land in a capped negative pre-event
//! zone; items within an hour of a bound snap to fixed positions so their
//! markers stay clear of the start/end indicator dots.

use crate::time::clock::Clock;
use crate::timeline::types::{EventBounds, TimedItem};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Items closer than this to a bound snap to the fixed 1/99 slots.
pub const BOUNDARY_WINDOW_MS: f64 = 3_600_000.0;

/// Depth of the pre-event zone in percent (rendered as negative).
pub const PRE_EVENT_SPAN_PCT: f64 = 20.0;

/// Pre-event lookback cap in days; older items pin to the zone floor.
pub const PRE_EVENT_WINDOW_DAYS: f64 = 30.0;

/// Maps timestamps to timeline positions against a fixed "now" snapshot.
///
/// "Now" is sampled once at construction so that every item in a layout
/// pass over an ongoing event sees the same effective end bound. Results
/// for ongoing events are snapshots, not cacheable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMapper {
    now_ms: f64,
}

impl PositionMapper {
    /// Snapshot the clock and build a mapper.
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            now_ms: clock.now_ms(),
        }
    }

    /// Build a mapper from an already-sampled instant.
    pub const fn with_now_ms(now_ms: f64) -> Self {
        Self { now_ms }
    }

    /// The "now" snapshot this mapper was built with.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Map a timestamp to a position in `[-20, 100]`.
    ///
    /// All inputs are epoch milliseconds. Degenerate inputs are not
    /// guarded: `end <= start` yields NaN or clamped proportions, and NaN
    /// timestamps fail every comparison below and land on the final
    /// fallback of 100. Callers validate bounds upstream if they care.
    pub fn map(&self, item_ms: f64, start_ms: f64, end_ms: Option<f64>) -> f64 {
        let effective_end = end_ms.unwrap_or(self.now_ms);
        let duration = effective_end - start_ms;

        // Pre-event zone: linear over the last 30 days, floored at -20%.
        if item_ms < start_ms {
            let days_before = (start_ms - item_ms) / MS_PER_DAY;
            let offset =
                PRE_EVENT_SPAN_PCT * days_before.min(PRE_EVENT_WINDOW_DAYS) / PRE_EVENT_WINDOW_DAYS;
            return -offset.min(PRE_EVENT_SPAN_PCT);
        }

        // Boundary snapping keeps markers off the bound indicator dots.
        if (item_ms - start_ms).abs() < BOUNDARY_WINDOW_MS {
            return 1.0;
        }
        if let Some(end) = end_ms {
            if (item_ms - end).abs() < BOUNDARY_WINDOW_MS {
                return 99.0;
            }
        }

        if start_ms <= item_ms && end_ms.map_or(true, |end| item_ms <= end) {
            let pct = ((item_ms - start_ms) / duration * 100.0).round();
            return pct.clamp(1.0, 99.0);
        }

        // Past a defined end, or a NaN that failed every guard above.
        100.0
    }

    /// Map an item against event bounds, parsing both timestamps fresh.
    pub fn map_item(&self, item: &TimedItem, bounds: &EventBounds) -> f64 {
        self.map(item.timestamp_ms(), bounds.start_ms(), bounds.end_ms())
    }
}
