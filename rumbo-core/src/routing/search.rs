//! Multi-start label-correcting search over the combined network
//!
//! The frontier is seeded from every candidate node around the origin and
//! settles labels keyed by `(node, route context)`, so the same node
//! reached on different routes keeps separate states. Boarding a route
//! different from the label's current one is charged that route's expected
//! wait, which makes transfers onto infrequent routes expensive and
//! transfers onto frequent ones cheap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::{HashMap, HashSet};
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::costing::{self, WalkMode};
use crate::error::Error;
use crate::model::{NetworkEdge, TransitNetwork};
use crate::routing::options::PlanOptions;
use crate::{RouteId, ShapeId, Time};

/// Search state identity: a node together with the route context it was
/// reached under
pub(crate) type LabelKey = (NodeIndex, Option<RouteId>);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Predecessor {
    /// Label seeded directly from the origin
    Seed,
    Step { prev: LabelKey, edge: EdgeIndex },
}

/// Finished search: the winning label plus the trace needed to rebuild the
/// itinerary
pub(crate) struct SearchTrace {
    pub(crate) end: LabelKey,
    /// Cumulative cost of `end` plus the egress walk
    pub(crate) total_cost: Time,
    pub(crate) egress_time: Time,
    pub(crate) predecessors: HashMap<LabelKey, Predecessor>,
    pub(crate) costs: HashMap<LabelKey, Time>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct QueueEntry {
    /// Cost plus admissible remaining-time bound; orders the frontier only
    priority: Time,
    cost: Time,
    node: NodeIndex,
    route: Option<RouteId>,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap (reversed from the standard BinaryHeap)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All indexed nodes within `radius` meters of `point`: walk-graph nodes
/// for snapping plus transit stops for direct seeding
fn candidate_nodes(
    network: &TransitNetwork,
    point: Point<f64>,
    radius: f64,
) -> Vec<(NodeIndex, f64)> {
    let mut nodes = network.walk_index.query(point, radius);
    nodes.extend(network.stop_index.query(point, radius));
    nodes
}

pub(crate) fn multi_start_search(
    network: &TransitNetwork,
    origin: Point<f64>,
    destination: Point<f64>,
    exclusions: &HashSet<ShapeId>,
    options: &PlanOptions,
) -> Result<SearchTrace, Error> {
    let radius = options.walk_radius_meters();
    let sources = candidate_nodes(network, origin, radius);
    let targets = candidate_nodes(network, destination, radius);
    if sources.is_empty() || targets.is_empty() {
        debug!("no candidate nodes within {radius:.0} m of origin or destination");
        return Err(Error::NoRouteFound);
    }

    let mut egress: HashMap<NodeIndex, Time> = HashMap::with_capacity(targets.len());
    let mut target_mask = FixedBitSet::with_capacity(network.graph.node_count());
    for (node, distance) in targets {
        egress.insert(node, costing::walking_duration(distance, WalkMode::Direct)?);
        target_mask.set(node.index(), true);
    }

    let mut costs: HashMap<LabelKey, Time> = HashMap::new();
    let mut predecessors: HashMap<LabelKey, Predecessor> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    for (node, distance) in sources {
        let access = costing::walking_duration(distance, WalkMode::Direct)?;
        let key = (node, None);
        if costs.get(&key).is_none_or(|&best| access < best) {
            costs.insert(key, access);
            predecessors.insert(key, Predecessor::Seed);
            frontier.push(QueueEntry {
                priority: access
                    + costing::travel_lower_bound(network.node_location(node), destination),
                cost: access,
                node,
                route: None,
            });
        }
    }

    // (end label, total cost with egress, egress walk)
    let mut best: Option<(LabelKey, Time, Time)> = None;
    let mut expansions = 0usize;

    while let Some(entry) = frontier.pop() {
        let key = (entry.node, entry.route);
        if costs.get(&key).is_none_or(|&cost| entry.cost > cost) {
            continue; // superseded by a cheaper label
        }
        if let Some((_, best_total, _)) = best {
            if entry.priority >= best_total {
                break; // the frontier can no longer improve on the best finish
            }
        }
        expansions += 1;
        if expansions > options.max_expansions {
            return Err(Error::SearchTimeout);
        }

        if target_mask.contains(entry.node.index()) {
            let walk_out = egress[&entry.node];
            let total = entry.cost + walk_out;
            if best.is_none_or(|(_, best_total, _)| total < best_total) {
                best = Some((key, total, walk_out));
            }
        }

        for edge in network.graph.edges(entry.node) {
            let (next_cost, next_route) = match edge.weight() {
                NetworkEdge::Walk(walk) => (entry.cost + walk.duration, None),
                NetworkEdge::Transit(transit) => {
                    if exclusions.contains(&transit.shape) {
                        continue;
                    }
                    // A schedule gap makes the edge unusable, not the search
                    let Ok(ride) = costing::travel_time(transit) else {
                        continue;
                    };
                    let wait = if entry.route == Some(transit.route) {
                        0
                    } else {
                        costing::expected_wait(
                            network.route(transit.route),
                            options.default_headway,
                        )
                    };
                    (entry.cost + ride + wait, Some(transit.route))
                }
            };

            let next_key = (edge.target(), next_route);
            if costs.get(&next_key).is_none_or(|&known| next_cost < known) {
                costs.insert(next_key, next_cost);
                predecessors.insert(next_key, Predecessor::Step {
                    prev: key,
                    edge: edge.id(),
                });
                frontier.push(QueueEntry {
                    priority: next_cost
                        + costing::travel_lower_bound(
                            network.node_location(edge.target()),
                            destination,
                        ),
                    cost: next_cost,
                    node: edge.target(),
                    route: next_route,
                });
            }
        }
    }

    match best {
        Some((end, total_cost, egress_time)) => {
            debug!("search settled after {expansions} expansions, total {total_cost} s");
            Ok(SearchTrace {
                end,
                total_cost,
                egress_time,
                predecessors,
                costs,
            })
        }
        None => {
            debug!("frontier exhausted after {expansions} expansions without reaching destination");
            Err(Error::NoRouteFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::fixtures;

    #[test]
    fn finds_transit_path_between_catchments() {
        let network = fixtures::direct_bus_network();
        let options = PlanOptions::default();
        let exclusions = HashSet::new();

        let trace = multi_start_search(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &exclusions,
            &options,
        )
        .unwrap();

        // walk 216 + wait 600 + ride 1080 + walk 216
        assert_eq!(trace.total_cost, 2112);
    }

    #[test]
    fn empty_catchment_fails_with_no_route() {
        let network = fixtures::direct_bus_network();
        let options = PlanOptions::default();
        let exclusions = HashSet::new();

        let result = multi_start_search(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(50_000.0, 50_000.0),
            &exclusions,
            &options,
        );
        assert!(matches!(result, Err(Error::NoRouteFound)));
    }

    #[test]
    fn expansion_budget_fails_with_timeout() {
        let network = fixtures::direct_bus_network();
        let options = PlanOptions {
            max_expansions: 1,
            ..PlanOptions::default()
        };
        let exclusions = HashSet::new();

        let result = multi_start_search(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &exclusions,
            &options,
        );
        assert!(matches!(result, Err(Error::SearchTimeout)));
    }

    #[test]
    fn excluded_shape_is_not_traversed() {
        let network = fixtures::direct_bus_network();
        let options = PlanOptions::default();
        // the only transit shape in the fixture
        let exclusions: HashSet<ShapeId> = [0].into_iter().collect();

        let result = multi_start_search(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &exclusions,
            &options,
        );
        assert!(matches!(result, Err(Error::NoRouteFound)));
    }

    #[test]
    fn unscheduled_edge_is_skipped() {
        let network = fixtures::gapped_schedule_network();
        let options = PlanOptions::default();
        let exclusions = HashSet::new();

        let trace = multi_start_search(
            &network,
            fixtures::p(0.0, 0.0),
            fixtures::p(4000.0, 0.0),
            &exclusions,
            &options,
        )
        .unwrap();

        // The unscheduled hop would be faster; the scheduled one must win.
        assert_eq!(trace.total_cost, 2112);
    }
}
