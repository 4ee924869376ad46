//! Itinerary reconstruction from a finished search trace
//!
//! Walks the predecessor chain back to a seed, then merges consecutive
//! same-route transit hops and contiguous walking into labeled segments
//! with stop names, route metadata and per-boarding waits.

mod to_geojson;

use geo::Point;
use itertools::Itertools;
use log::error;
use petgraph::graph::NodeIndex;

use crate::costing;
use crate::error::Error;
use crate::model::{NetworkEdge, TransitNetwork};
use crate::routing::options::PlanOptions;
use crate::routing::search::{Predecessor, SearchTrace};
use crate::{RouteId, ShapeId, Time};

/// One end of a segment: a graph node, or the request's own origin or
/// destination coordinate
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub node: Option<NodeIndex>,
    pub location: Point<f64>,
    /// Stop display name when the endpoint is a transit stop
    pub name: Option<String>,
}

impl Endpoint {
    fn place(location: Point<f64>) -> Self {
        Self {
            node: None,
            location,
            name: None,
        }
    }

    fn at_node(network: &TransitNetwork, node: NodeIndex) -> Self {
        Self {
            node: Some(node),
            location: network.node_location(node),
            name: network.stop_name(node),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WalkSegment {
    pub from: Endpoint,
    pub to: Endpoint,
    /// Intermediate node locations, exclusive of the endpoints
    pub via: Vec<Point<f64>>,
    pub duration: Time,
}

#[derive(Debug, Clone)]
pub struct TransitSegment {
    /// Boarding stop
    pub from: Endpoint,
    /// Alighting stop
    pub to: Endpoint,
    pub route: RouteId,
    pub shape: ShapeId,
    pub route_name: String,
    pub route_color: Option<String>,
    pub headsign: Option<String>,
    /// Intermediate stop locations, exclusive of the endpoints
    pub via: Vec<Point<f64>>,
    /// Number of stop-to-stop hops ridden
    pub stops: usize,
    /// Expected wait before boarding
    pub wait: Time,
    /// In-vehicle time
    pub duration: Time,
}

#[derive(Debug, Clone)]
pub enum Segment {
    Walk(WalkSegment),
    Transit(TransitSegment),
}

impl Segment {
    pub fn start(&self) -> &Endpoint {
        match self {
            Segment::Walk(walk) => &walk.from,
            Segment::Transit(transit) => &transit.from,
        }
    }

    pub fn end(&self) -> &Endpoint {
        match self {
            Segment::Walk(walk) => &walk.to,
            Segment::Transit(transit) => &transit.to,
        }
    }

    /// Travel time of the segment, excluding any boarding wait
    pub fn duration(&self) -> Time {
        match self {
            Segment::Walk(walk) => walk.duration,
            Segment::Transit(transit) => transit.duration,
        }
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, Segment::Transit(_))
    }
}

/// Complete journey between the requested coordinates.
///
/// `total_time` is always the sum of segment durations and waits; it is
/// never recomputed from anything else.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub segments: Vec<Segment>,
    pub total_time: Time,
    pub walking_time: Time,
    pub transit_time: Time,
    pub waiting_time: Time,
    pub transfers: usize,
}

impl Itinerary {
    /// Ordered route ids of the transit segments; the identity used for
    /// alternative deduplication
    pub fn route_sequence(&self) -> Vec<RouteId> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Transit(transit) => Some(transit.route),
                Segment::Walk(_) => None,
            })
            .collect()
    }

    pub fn has_transit(&self) -> bool {
        self.segments.iter().any(Segment::is_transit)
    }
}

/// Edge of the predecessor chain resolved against the graph
struct Step {
    from: NodeIndex,
    to: NodeIndex,
    route: Option<(RouteId, ShapeId)>,
    duration: Time,
}

pub(crate) fn build_itinerary(
    network: &TransitNetwork,
    origin: Point<f64>,
    destination: Point<f64>,
    trace: &SearchTrace,
    options: &PlanOptions,
) -> Result<Itinerary, Error> {
    let steps = resolve_chain(network, trace)?;
    let seed = steps
        .first()
        .map_or(trace.end, |step| (step.from, None))
        .0;
    let access_time = trace
        .costs
        .get(&(seed, None))
        .copied()
        .ok_or(Error::BrokenChain)?;

    let mut segments: Vec<Segment> = Vec::new();
    let mut walk_from = Endpoint::place(origin);
    let mut walk_nodes: Vec<NodeIndex> = Vec::new();
    let mut walk_time = access_time;

    let chunks = steps
        .iter()
        .chunk_by(|step| step.route.map(|(route, _)| route));
    for (route, chunk) in &chunks {
        let chunk: Vec<&Step> = chunk.collect();
        match route {
            None => {
                for step in chunk {
                    walk_nodes.push(step.to);
                    walk_time += step.duration;
                }
            }
            Some(route) => {
                let board = chunk[0].from;
                if walk_nodes.last() == Some(&board) {
                    walk_nodes.pop();
                }
                if walk_time > 0 || !walk_nodes.is_empty() || segments.is_empty() {
                    segments.push(Segment::Walk(WalkSegment {
                        from: walk_from.clone(),
                        to: Endpoint::at_node(network, board),
                        via: walk_nodes.iter().map(|&n| network.node_location(n)).collect(),
                        duration: walk_time,
                    }));
                }
                walk_nodes.clear();
                walk_time = 0;

                let Some((_, shape)) = chunk[0].route else {
                    unreachable!("transit chunk without a route")
                };
                let alight = chunk[chunk.len() - 1].to;
                let info = network.route(route);
                segments.push(Segment::Transit(TransitSegment {
                    from: Endpoint::at_node(network, board),
                    to: Endpoint::at_node(network, alight),
                    route,
                    shape,
                    route_name: info.short_name.clone(),
                    route_color: info.color.clone(),
                    headsign: network.shape(shape).headsign.clone(),
                    via: chunk[..chunk.len() - 1]
                        .iter()
                        .map(|step| network.node_location(step.to))
                        .collect(),
                    stops: chunk.len(),
                    wait: costing::expected_wait(info, options.default_headway),
                    duration: chunk.iter().map(|step| step.duration).sum(),
                }));
                walk_from = Endpoint::at_node(network, alight);
            }
        }
    }

    // Egress: close the trailing walk at the true destination
    walk_time += trace.egress_time;
    segments.push(Segment::Walk(WalkSegment {
        from: walk_from,
        to: Endpoint::place(destination),
        via: walk_nodes.iter().map(|&n| network.node_location(n)).collect(),
        duration: walk_time,
    }));

    let mut walking_time = 0;
    let mut transit_time = 0;
    let mut waiting_time = 0;
    let mut rides = 0usize;
    for segment in &segments {
        match segment {
            Segment::Walk(walk) => walking_time += walk.duration,
            Segment::Transit(transit) => {
                transit_time += transit.duration;
                waiting_time += transit.wait;
                rides += 1;
            }
        }
    }
    let total_time = walking_time + transit_time + waiting_time;
    debug_assert_eq!(total_time, trace.total_cost);

    Ok(Itinerary {
        segments,
        total_time,
        walking_time,
        transit_time,
        waiting_time,
        transfers: rides.saturating_sub(1),
    })
}

/// Backtrack the predecessor chain of the winning label and resolve it into
/// forward-ordered steps
fn resolve_chain(network: &TransitNetwork, trace: &SearchTrace) -> Result<Vec<Step>, Error> {
    let mut edges = Vec::new();
    let mut cursor = trace.end;
    loop {
        match trace.predecessors.get(&cursor) {
            Some(Predecessor::Seed) => break,
            Some(Predecessor::Step { prev, edge }) => {
                edges.push(*edge);
                cursor = *prev;
            }
            None => {
                error!("predecessor chain broken at node {:?}", cursor.0);
                return Err(Error::BrokenChain);
            }
        }
    }
    edges.reverse();

    let mut steps = Vec::with_capacity(edges.len());
    for edge in edges {
        let (from, to) = network
            .graph
            .edge_endpoints(edge)
            .ok_or(Error::BrokenChain)?;
        let step = match network.graph.edge_weight(edge).ok_or(Error::BrokenChain)? {
            NetworkEdge::Walk(walk) => Step {
                from,
                to,
                route: None,
                duration: walk.duration,
            },
            NetworkEdge::Transit(transit) => Step {
                from,
                to,
                route: Some((transit.route, transit.shape)),
                duration: costing::travel_time(transit).map_err(|_| Error::BrokenChain)?,
            },
        };
        steps.push(step);
    }
    Ok(steps)
}
