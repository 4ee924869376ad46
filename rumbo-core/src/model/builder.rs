//! In-memory assembly of the combined network
//!
//! Loader layers (GTFS, street data) feed nodes, routes, shapes and edges
//! through this builder; `build` freezes everything into a shareable
//! [`TransitNetwork`].

use geo::Point;
use log::info;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::costing::{self, WalkMode};
use crate::error::Error;
use crate::model::network::{
    NetworkEdge, NetworkNode, RouteInfo, ShapeInfo, StopNode, TransitEdge, TransitNetwork,
    WalkEdge, WalkNode,
};
use crate::model::spatial::SpatialIndex;
use crate::{RouteId, ShapeId, Time};

#[derive(Debug)]
pub struct NetworkBuilder {
    graph: DiGraph<NetworkNode, NetworkEdge>,
    routes: Vec<RouteInfo>,
    shapes: Vec<ShapeInfo>,
    /// Observed headway samples per route, consumed at build time
    headways: Vec<Vec<Time>>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            routes: Vec::new(),
            shapes: Vec::new(),
            headways: Vec::new(),
        }
    }

    pub fn add_walk_node(&mut self, id: i64, location: Point<f64>) -> NodeIndex {
        self.graph.add_node(NetworkNode::Walk(WalkNode {
            id,
            geometry: location,
        }))
    }

    pub fn add_stop(&mut self, stop_id: &str, name: &str, location: Point<f64>) -> NodeIndex {
        self.graph.add_node(NetworkNode::Stop(StopNode {
            stop_id: stop_id.to_owned(),
            name: name.to_owned(),
            geometry: location,
        }))
    }

    /// Register a route with its observed headway samples in seconds.
    pub fn add_route(
        &mut self,
        route_id: &str,
        short_name: &str,
        long_name: &str,
        color: Option<&str>,
        headways: &[Time],
    ) -> RouteId {
        self.routes.push(RouteInfo {
            route_id: route_id.to_owned(),
            short_name: short_name.to_owned(),
            long_name: long_name.to_owned(),
            color: color.map(str::to_owned),
            median_headway: None,
            shapes: Vec::new(),
        });
        self.headways.push(headways.to_vec());
        self.routes.len() - 1
    }

    /// Register one trip pattern of an already registered route.
    pub fn add_shape(
        &mut self,
        route: RouteId,
        shape_id: &str,
        headsign: Option<&str>,
    ) -> Result<ShapeId, Error> {
        if route >= self.routes.len() {
            return Err(Error::InvalidData(format!("unknown route index {route}")));
        }
        self.shapes.push(ShapeInfo {
            shape_id: shape_id.to_owned(),
            headsign: headsign.map(str::to_owned),
            route,
        });
        let shape = self.shapes.len() - 1;
        self.routes[route].shapes.push(shape);
        Ok(shape)
    }

    /// Undirected pedestrian link; `distance` is the routed length in meters.
    pub fn link_walk(&mut self, a: NodeIndex, b: NodeIndex, distance: f64) -> Result<(), Error> {
        let duration = costing::walking_duration(distance, WalkMode::OnPath)?;
        self.check_node(a)?;
        self.check_node(b)?;
        self.graph.add_edge(a, b, NetworkEdge::Walk(WalkEdge { duration }));
        self.graph.add_edge(b, a, NetworkEdge::Walk(WalkEdge { duration }));
        Ok(())
    }

    /// Directed scheduled hop between two consecutive stops of a shape.
    /// `duration` is the stop-to-stop schedule delta; pass `None` when the
    /// feed recorded no timing (the hop stays in the graph but is never
    /// traversed).
    pub fn add_transit_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        shape: ShapeId,
        duration: Option<Time>,
    ) -> Result<EdgeIndex, Error> {
        let route = self
            .shapes
            .get(shape)
            .map(|info| info.route)
            .ok_or_else(|| Error::InvalidData(format!("unknown shape index {shape}")))?;

        for node in [from, to] {
            match self.graph.node_weight(node) {
                Some(NetworkNode::Stop(_)) => {}
                Some(NetworkNode::Walk(_)) => {
                    return Err(Error::InvalidData(
                        "transit edges must join transit stops".to_owned(),
                    ));
                }
                None => {
                    return Err(Error::InvalidData(format!(
                        "node index {} out of bounds",
                        node.index()
                    )));
                }
            }
        }

        Ok(self.graph.add_edge(
            from,
            to,
            NetworkEdge::Transit(TransitEdge {
                route,
                shape,
                duration,
            }),
        ))
    }

    /// Freeze the assembled data into a read-only network: computes median
    /// headways and bulk-loads the spatial indices.
    pub fn build(mut self) -> TransitNetwork {
        for (route, samples) in self.routes.iter_mut().zip(self.headways.iter_mut()) {
            route.median_headway = median(samples);
        }

        let walk_index = SpatialIndex::over(&self.graph, |node| !node.is_stop());
        let stop_index = SpatialIndex::over(&self.graph, NetworkNode::is_stop);

        info!(
            "Built network: {} nodes, {} edges, {} routes, {} shapes",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.routes.len(),
            self.shapes.len()
        );

        TransitNetwork {
            graph: self.graph,
            routes: self.routes,
            shapes: self.shapes,
            walk_index,
            stop_index,
        }
    }

    fn check_node(&self, node: NodeIndex) -> Result<(), Error> {
        if self.graph.node_weight(node).is_none() {
            return Err(Error::InvalidData(format!(
                "node index {} out of bounds",
                node.index()
            )));
        }
        Ok(())
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn median(samples: &mut [Time]) -> Option<Time> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable();
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        Some((samples[mid - 1] + samples[mid]) / 2)
    } else {
        Some(samples[mid])
    }
}
