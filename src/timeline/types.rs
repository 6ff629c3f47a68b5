//! Core types for timeline layout
//!
//! Defines the data structures flowing through the layout pipeline.

use serde::{Deserialize, Serialize};

use crate::time::parse::parse_timestamp_ms;

/// A dated record projected onto the timeline.
///
/// Read-only input owned by the caller; the layout pipeline never mutates
/// it, only copies it into clusters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedItem {
    /// Unique identifier
    pub id: String,
    /// ISO-8601 date or date-time string
    pub timestamp: String,
}

impl TimedItem {
    /// Create a new timed item.
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The item's timestamp as epoch milliseconds (NaN if unparseable).
    pub fn timestamp_ms(&self) -> f64 {
        parse_timestamp_ms(&self.timestamp)
    }
}

/// The `[start, end?]` window defining a timeline's 0%-100% span.
///
/// A missing `end` means the event is ongoing; the mapper substitutes its
/// "now" snapshot as the effective end for duration math, while any
/// timestamp at or after `start` still counts as within bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBounds {
    /// ISO-8601 start of the event
    pub start: String,
    /// ISO-8601 end of the event, absent while ongoing
    #[serde(default)]
    pub end: Option<String>,
}

impl EventBounds {
    /// Bounds with an explicit end.
    pub fn new(start: impl Into<String>, end: Option<&str>) -> Self {
        Self {
            start: start.into(),
            end: end.map(str::to_owned),
        }
    }

    /// Bounds for an event that has not ended.
    pub fn ongoing(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Whether the event has no end bound.
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// Start of the window as epoch milliseconds (NaN if unparseable).
    pub fn start_ms(&self) -> f64 {
        parse_timestamp_ms(&self.start)
    }

    /// End of the window as epoch milliseconds, if present.
    pub fn end_ms(&self) -> Option<f64> {
        self.end.as_deref().map(parse_timestamp_ms)
    }
}

/// A visual cluster of co-located items.
///
/// Built incrementally during a single grouping pass and discarded on the
/// next invocation; clusters have no identity across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Running mean of the members' positions
    pub position: f64,
    /// Members in arrival order
    pub members: Vec<TimedItem>,
}

impl Cluster {
    /// Start a cluster from its first member.
    pub fn seed(item: TimedItem, position: f64) -> Self {
        Self {
            position,
            members: vec![item],
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// A cluster always holds at least its seed item.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One renderable marker per cluster.
///
/// `position` is percent along the axis (may be negative in the pre-event
/// zone); `count` is the badge the UI shows when greater than 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Percent along the timeline axis
    pub position: f64,
    /// Number of items behind this marker
    pub count: usize,
    /// Ids of the items behind this marker, in arrival order
    pub item_ids: Vec<String>,
}

impl From<&Cluster> for Marker {
    fn from(cluster: &Cluster) -> Self {
        Self {
            position: cluster.position,
            count: cluster.members.len(),
            item_ids: cluster.members.iter().map(|m| m.id.clone()).collect(),
        }
    }
}
