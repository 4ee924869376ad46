//! Request-level configuration for route planning

use serde::{Deserialize, Serialize};

use crate::Time;
use crate::costing;

/// Which transit legs of found itineraries are forbidden in later
/// alternative-search iterations.
///
/// Restricting only the first boarding tends to produce materially
/// different routes; forbidding every used shape prunes harder and may
/// yield fewer results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Forbid the shape of each itinerary's first transit segment
    FirstLeg,
    /// Forbid the shapes of every transit segment
    AllLegs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Walking radius around origin and destination, in seconds of walking
    pub walk_radius: Time,
    /// Maximum number of itineraries to return
    pub max_alternatives: usize,
    /// Frontier expansion budget per search run; exceeding it fails the
    /// request with `SearchTimeout`
    pub max_expansions: usize,
    /// Wait charged for routes without a measurable headway, in seconds
    pub default_headway: Time,
    pub exclusion_policy: ExclusionPolicy,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            walk_radius: 300,
            max_alternatives: 3,
            max_expansions: 2_000_000,
            default_headway: 1800,
            exclusion_policy: ExclusionPolicy::FirstLeg,
        }
    }
}

impl PlanOptions {
    /// Spatial query radius in meters matching `walk_radius` seconds of
    /// direct-regime walking.
    pub(crate) fn walk_radius_meters(&self) -> f64 {
        f64::from(self.walk_radius) * costing::DIRECT_SPEED
    }
}
