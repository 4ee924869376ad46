//! Generation of ranked, materially different route alternatives
//!
//! Runs the search repeatedly, each time forbidding transit shapes used by
//! already-found itineraries, so later runs are pushed onto genuinely
//! different lines instead of trivial detours.

use geo::Point;
use hashbrown::HashSet;
use log::debug;
use rayon::prelude::*;

use crate::error::Error;
use crate::model::TransitNetwork;
use crate::routing::itinerary::{Itinerary, Segment, build_itinerary};
use crate::routing::options::{ExclusionPolicy, PlanOptions};
use crate::routing::search::multi_start_search;
use crate::{RouteId, ShapeId};

/// Duplicate itineraries tolerated before the alternative loop gives up
const MAX_DUPLICATE_RETRIES: usize = 2;

/// Plan up to `options.max_alternatives` itineraries between two projected
/// coordinates, ranked by total time (ties by fewer transfers).
///
/// # Errors
///
/// `NoRouteFound` when no itinerary exists at all, `SearchTimeout` when the
/// first search exhausts its expansion budget, `InvalidDistance` on
/// malformed coordinates. Later iterations failing only shorten the result.
pub fn plan_route(
    network: &TransitNetwork,
    origin: Point<f64>,
    destination: Point<f64>,
    options: &PlanOptions,
) -> Result<Vec<Itinerary>, Error> {
    let mut itineraries: Vec<Itinerary> = Vec::new();
    let mut seen: HashSet<Vec<RouteId>> = HashSet::new();
    let mut exclusions: HashSet<ShapeId> = HashSet::new();
    let mut duplicates = 0usize;

    while itineraries.len() < options.max_alternatives {
        let trace = match multi_start_search(network, origin, destination, &exclusions, options) {
            Ok(trace) => trace,
            Err(err) if itineraries.is_empty() => return Err(err),
            Err(err) => {
                debug!("alternative search stopped: {err}");
                break;
            }
        };
        let itinerary = build_itinerary(network, origin, destination, &trace, options)?;

        let grew = extend_exclusions(&mut exclusions, &itinerary, options.exclusion_policy);

        if !seen.insert(itinerary.route_sequence()) {
            // Same ordered routes over a different shape; does not
            // consume a result slot
            duplicates += 1;
            if !grew || duplicates > MAX_DUPLICATE_RETRIES {
                break;
            }
            continue;
        }

        itineraries.push(itinerary);
        if !grew {
            // Walking-only result leaves nothing to exclude; rerunning
            // would find the identical itinerary
            break;
        }
    }

    itineraries.sort_by_key(|itinerary| (itinerary.total_time, itinerary.transfers));
    Ok(itineraries)
}

/// Plan independent requests in parallel against the same read-only network.
pub fn plan_route_many(
    network: &TransitNetwork,
    pairs: &[(Point<f64>, Point<f64>)],
    options: &PlanOptions,
) -> Vec<Result<Vec<Itinerary>, Error>> {
    pairs
        .par_iter()
        .map(|&(origin, destination)| plan_route(network, origin, destination, options))
        .collect()
}

fn extend_exclusions(
    exclusions: &mut HashSet<ShapeId>,
    itinerary: &Itinerary,
    policy: ExclusionPolicy,
) -> bool {
    let mut shapes = itinerary.segments.iter().filter_map(|segment| match segment {
        Segment::Transit(transit) => Some(transit.shape),
        Segment::Walk(_) => None,
    });

    let mut grew = false;
    match policy {
        ExclusionPolicy::FirstLeg => {
            if let Some(shape) = shapes.next() {
                grew |= exclusions.insert(shape);
            }
        }
        ExclusionPolicy::AllLegs => {
            for shape in shapes {
                grew |= exclusions.insert(shape);
            }
        }
    }
    grew
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::fixtures;

    #[test]
    fn direct_bus_scenario_lands_in_expected_window() {
        let network = fixtures::direct_bus_network();
        let itineraries = plan_route(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &PlanOptions::default(),
        )
        .unwrap();

        // Single line available: one itinerary, gracefully fewer than three
        assert_eq!(itineraries.len(), 1);
        let first = &itineraries[0];
        assert!(first.total_time >= 26 * 60 && first.total_time <= 36 * 60);
        assert_eq!(first.waiting_time, 600);
    }

    #[test]
    fn alternatives_are_ordered_and_distinct() {
        let network = fixtures::two_line_network();
        let itineraries = plan_route(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &PlanOptions::default(),
        )
        .unwrap();

        assert_eq!(itineraries.len(), 2);
        assert!(itineraries[0].total_time <= itineraries[1].total_time);
        assert_ne!(itineraries[0].route_sequence(), itineraries[1].route_sequence());

        // The frequent local beats the rare express despite the slower ride
        assert_eq!(itineraries[0].total_time, 1872);
        assert_eq!(itineraries[1].total_time, 1944);
    }

    #[test]
    fn exclusion_policy_controls_diversity() {
        let network = fixtures::branching_network();
        let origin = fixtures::p(0.0, 0.0);
        let destination = fixtures::p(4000.0, 0.0);

        let first_leg = plan_route(&network, origin, destination, &PlanOptions::default()).unwrap();
        // Excluding only the first boarding lets the second leg reuse the
        // shared connecting line
        assert_eq!(first_leg.len(), 2);
        assert_eq!(first_leg[0].route_sequence().len(), 2);
        assert_eq!(first_leg[1].route_sequence().len(), 2);
        assert_eq!(
            first_leg[0].route_sequence()[1],
            first_leg[1].route_sequence()[1]
        );

        let all_legs = plan_route(
            &network,
            origin,
            destination,
            &PlanOptions {
                exclusion_policy: ExclusionPolicy::AllLegs,
                ..PlanOptions::default()
            },
        )
        .unwrap();
        // Forbidding the shared second leg too leaves no second itinerary
        assert_eq!(all_legs.len(), 1);
    }

    #[test]
    fn duplicate_sequences_are_discarded() {
        let network = fixtures::twin_shape_network();
        let itineraries = plan_route(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &PlanOptions::default(),
        )
        .unwrap();

        // Both shapes belong to the same route: the second find is a
        // duplicate and must not be returned
        assert_eq!(itineraries.len(), 1);
    }

    #[test]
    fn unreachable_destination_fails_with_no_route() {
        let network = fixtures::direct_bus_network();
        let result = plan_route(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(50_000.0, 50_000.0),
            &PlanOptions::default(),
        );
        assert!(matches!(result, Err(Error::NoRouteFound)));
    }

    #[test]
    fn repeated_calls_return_identical_itineraries() {
        let network = fixtures::two_line_network();
        let options = PlanOptions::default();
        let origin = fixtures::p(0.0, 0.0);
        let destination = fixtures::p(4000.0, 0.0);

        let first = plan_route(&network, origin, destination, &options).unwrap();
        let second = plan_route(&network, origin, destination, &options).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.route_sequence(), b.route_sequence());
            assert_eq!(a.total_time, b.total_time);
        }
    }

    #[test]
    fn bulk_planning_matches_single_requests() {
        let network = fixtures::two_line_network();
        let options = PlanOptions::default();
        let pairs = vec![
            (fixtures::p(0.0, 0.0), fixtures::p(4000.0, 0.0)),
            (fixtures::p(0.0, 0.0), fixtures::p(50_000.0, 50_000.0)),
        ];

        let results = plan_route_many(&network, &pairs, &options);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().len(), 2);
        assert!(matches!(results[1], Err(Error::NoRouteFound)));
    }
}
