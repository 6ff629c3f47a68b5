//! Timeline layout
//!
//! Maps dated items onto a normalized percent axis and declutters them
//! into visual groups:
//! - position mapping with a capped pre-event zone and boundary snapping
//! - greedy first-fit proximity grouping
//! - a layout pipeline producing one renderable marker per group

pub mod grouping;
pub mod layout;
pub mod position;
pub mod types;

pub use grouping::{GroupingConfig, ProximityGrouper};
pub use layout::LayoutEngine;
pub use position::PositionMapper;
pub use types::{Cluster, EventBounds, Marker, TimedItem};
