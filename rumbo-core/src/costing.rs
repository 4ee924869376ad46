//! Cost models for walking and transit legs
//!
//! Walking converts distance to seconds under two speed regimes; transit
//! reads scheduled stop-to-stop deltas and prices boarding as the route's
//! median headway.

use geo::{Distance, Euclidean, Point};

use crate::Time;
use crate::error::Error;
use crate::model::{RouteInfo, TransitEdge};

/// Walking speed along routed street geometry, m/s (5 km/h)
pub const ON_PATH_SPEED: f64 = 5.0 / 3.6;
/// Walking speed applied to straight-line fallback distances, m/s (3 km/h)
pub const DIRECT_SPEED: f64 = 3.0 / 3.6;
/// Upper bound on any in-network speed, m/s; divisor of the frontier bound
const MAX_NETWORK_SPEED: f64 = 30.0;

/// Distance regime for [`walking_duration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Distance measured along the walking graph
    OnPath,
    /// Straight-line distance between two coordinates
    Direct,
}

/// Convert a walking distance in meters to whole seconds.
///
/// `Direct` is slower than `OnPath`: straight-line distances underestimate
/// the real path, so they are priced against a reduced speed.
pub fn walking_duration(distance: f64, mode: WalkMode) -> Result<Time, Error> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(Error::InvalidDistance(distance));
    }
    let speed = match mode {
        WalkMode::OnPath => ON_PATH_SPEED,
        WalkMode::Direct => DIRECT_SPEED,
    };
    Ok((distance / speed).round() as Time)
}

/// Scheduled stop-to-stop travel time of a transit hop.
pub fn travel_time(edge: &TransitEdge) -> Result<Time, Error> {
    edge.duration.ok_or(Error::MissingSchedule)
}

/// Expected wait when boarding `route`: the median observed headway, or the
/// configured default when the route never ran often enough to measure one.
pub fn expected_wait(route: &RouteInfo, default_headway: Time) -> Time {
    route.median_headway.unwrap_or(default_headway)
}

/// Admissible lower bound on the remaining travel time between two points.
/// Used only to order the frontier, never folded into stored costs.
pub(crate) fn travel_lower_bound(from: Point<f64>, to: Point<f64>) -> Time {
    (Euclidean.distance(from, to) / MAX_NETWORK_SPEED) as Time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RouteId, ShapeId};

    fn route_with_headway(median_headway: Option<Time>) -> RouteInfo {
        RouteInfo {
            route_id: "R1".to_string(),
            short_name: "1".to_string(),
            long_name: "Test line".to_string(),
            color: None,
            median_headway,
            shapes: Vec::new(),
        }
    }

    #[test]
    fn on_path_walking_uses_five_kmh() {
        assert_eq!(walking_duration(300.0, WalkMode::OnPath).unwrap(), 216);
        assert_eq!(walking_duration(0.0, WalkMode::OnPath).unwrap(), 0);
    }

    #[test]
    fn direct_walking_is_penalized() {
        assert_eq!(walking_duration(300.0, WalkMode::Direct).unwrap(), 360);
        let on_path = walking_duration(1000.0, WalkMode::OnPath).unwrap();
        let direct = walking_duration(1000.0, WalkMode::Direct).unwrap();
        assert!(direct > on_path);
    }

    #[test]
    fn negative_distance_is_rejected() {
        assert!(matches!(
            walking_duration(-1.0, WalkMode::OnPath),
            Err(Error::InvalidDistance(_))
        ));
        assert!(matches!(
            walking_duration(f64::NAN, WalkMode::Direct),
            Err(Error::InvalidDistance(_))
        ));
    }

    #[test]
    fn missing_schedule_makes_edge_unusable() {
        let edge = TransitEdge {
            route: 0 as RouteId,
            shape: 0 as ShapeId,
            duration: None,
        };
        assert!(matches!(travel_time(&edge), Err(Error::MissingSchedule)));
    }

    #[test]
    fn wait_falls_back_to_default_headway() {
        assert_eq!(expected_wait(&route_with_headway(Some(420)), 1800), 420);
        assert_eq!(expected_wait(&route_with_headway(None), 1800), 1800);
    }

    #[test]
    fn lower_bound_never_exceeds_walking_time() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(900.0, 0.0);
        let bound = travel_lower_bound(from, to);
        let walk = walking_duration(900.0, WalkMode::Direct).unwrap();
        assert!(bound <= walk);
    }
}
