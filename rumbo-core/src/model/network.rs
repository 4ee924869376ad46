//! Combined walking + transit graph and its read-only query context

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::spatial::SpatialIndex;
use crate::{RouteId, ShapeId, Time};

/// Walking-network node carried over from the street graph
#[derive(Debug, Clone)]
pub struct WalkNode {
    /// Stable id of the node in the source walking graph
    pub id: i64,
    /// Node coordinates, projected planar CRS
    pub geometry: Point<f64>,
}

/// Public transit stop
#[derive(Debug, Clone)]
pub struct StopNode {
    pub stop_id: String,
    pub name: String,
    pub geometry: Point<f64>,
}

/// Node of the combined graph
#[derive(Debug, Clone)]
pub enum NetworkNode {
    Walk(WalkNode),
    Stop(StopNode),
}

impl NetworkNode {
    pub fn geometry(&self) -> Point<f64> {
        match self {
            NetworkNode::Walk(node) => node.geometry,
            NetworkNode::Stop(stop) => stop.geometry,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, NetworkNode::Stop(_))
    }
}

/// Street segment with a fixed crossing time
#[derive(Debug, Clone)]
pub struct WalkEdge {
    /// Pedestrian crossing time in seconds
    pub duration: Time,
}

/// Scheduled hop between two consecutive stops of one trip shape
#[derive(Debug, Clone)]
pub struct TransitEdge {
    pub route: RouteId,
    pub shape: ShapeId,
    /// Stop-to-stop schedule delta; `None` when the feed had no timing
    pub duration: Option<Time>,
}

/// Edge of the combined graph
#[derive(Debug, Clone)]
pub enum NetworkEdge {
    Walk(WalkEdge),
    Transit(TransitEdge),
}

/// Display and frequency data for one route
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub route_id: String,
    pub short_name: String,
    pub long_name: String,
    pub color: Option<String>,
    /// Median of observed headways; `None` when fewer than two departures
    /// were observed
    pub median_headway: Option<Time>,
    /// Trip shapes operating under this route
    pub shapes: Vec<ShapeId>,
}

/// One trip pattern of a route
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    pub shape_id: String,
    pub headsign: Option<String>,
    pub route: RouteId,
}

/// Read-only routing context shared by concurrent requests.
///
/// Immutable after [`NetworkBuilder::build`](crate::NetworkBuilder::build);
/// all per-request search state lives outside of it.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    pub graph: DiGraph<NetworkNode, NetworkEdge>,
    pub routes: Vec<RouteInfo>,
    pub shapes: Vec<ShapeInfo>,
    /// Walk-graph nodes only, for origin/destination snapping
    pub walk_index: SpatialIndex,
    /// Transit stops only, for route seeding
    pub stop_index: SpatialIndex,
}

impl TransitNetwork {
    /// Get the location of a node by index
    pub fn node_location(&self, node: NodeIndex) -> Point<f64> {
        self.graph
            .node_weight(node)
            .map_or_else(|| Point::new(0.0, 0.0), NetworkNode::geometry)
    }

    /// Get the display name of a node, if it is a transit stop
    pub fn stop_name(&self, node: NodeIndex) -> Option<String> {
        match self.graph.node_weight(node) {
            Some(NetworkNode::Stop(stop)) => Some(stop.name.clone()),
            _ => None,
        }
    }

    pub fn route(&self, route: RouteId) -> &RouteInfo {
        &self.routes[route]
    }

    pub fn shape(&self, shape: ShapeId) -> &ShapeInfo {
        &self.shapes[shape]
    }
}
