//! Proximity Grouping
//!
//! Folds mapped positions into visual clusters so nearby markers render
//! as one badge. Greedy first-fit: an item joins the first existing
//! cluster within the threshold, scanning clusters in creation order,
//! never the numerically closest one. Permuting the input can therefore
//! change the grouping; tests pin that behavior down.

use serde::{Deserialize, Serialize};

use crate::timeline::position::PositionMapper;
use crate::timeline::types::{Cluster, EventBounds, TimedItem};

/// Configuration for proximity grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Maximum percent distance between an item and a cluster's current
    /// position for the item to merge into it
    pub threshold_pct: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self { threshold_pct: 5.0 }
    }
}

impl GroupingConfig {
    /// Validate configuration values and return errors for invalid settings.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.threshold_pct.is_finite() || self.threshold_pct <= 0.0 {
            errors.push(format!(
                "threshold_pct must be a positive finite number, got {}",
                self.threshold_pct
            ));
        }
        // The axis spans -20..100; beyond that everything is one cluster.
        if self.threshold_pct > 120.0 {
            errors.push(format!(
                "threshold_pct must be <= 120, got {}",
                self.threshold_pct
            ));
        }
        errors
    }
}

/// Proximity grouper
pub struct ProximityGrouper {
    /// Configuration
    pub config: GroupingConfig,
}

impl ProximityGrouper {
    /// Create with default config
    pub fn new() -> Self {
        Self {
            config: GroupingConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Group items into clusters by position proximity.
    ///
    /// Single left-to-right pass, O(n * clusters). Every input item ends
    /// up in exactly one cluster; clusters come back in creation order.
    /// An empty input yields an empty output, never an error.
    pub fn group(
        &self,
        items: &[TimedItem],
        bounds: &EventBounds,
        mapper: &PositionMapper,
    ) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::new();

        for item in items {
            let position = mapper.map_item(item, bounds);

            let slot = clusters
                .iter_mut()
                .find(|c| (c.position - position).abs() < self.config.threshold_pct);

            match slot {
                Some(cluster) => {
                    cluster.members.push(item.clone());
                    // Mean over fresh mappings of every member, not an
                    // incremental update: float drift stays bounded by
                    // member count, not call count.
                    let sum: f64 = cluster
                        .members
                        .iter()
                        .map(|m| mapper.map_item(m, bounds))
                        .sum();
                    cluster.position = sum / cluster.members.len() as f64;
                }
                None => clusters.push(Cluster::seed(item.clone(), position)),
            }
        }

        clusters
    }
}

impl Default for ProximityGrouper {
    fn default() -> Self {
        Self::new()
    }
}
