//! Spatial lookup of graph nodes near a projected coordinate

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use crate::model::network::{NetworkEdge, NetworkNode};

/// Graph node anchored at its projected coordinate for R-tree storage
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Read-only R-tree over a subset of the network's nodes.
///
/// Built once at network assembly; queries are safe to run concurrently.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Index every node of `graph` accepted by `filter`
    pub(crate) fn over(
        graph: &DiGraph<NetworkNode, NetworkEdge>,
        filter: impl Fn(&NetworkNode) -> bool,
    ) -> Self {
        let points = graph
            .node_indices()
            .filter_map(|idx| {
                let node = &graph[idx];
                filter(node).then(|| {
                    let location = node.geometry();
                    GeomWithData::new([location.x(), location.y()], idx)
                })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Indexed nodes within `radius` meters of `point`, ascending by
    /// distance. Empty when nothing lies within the radius.
    pub fn query(&self, point: Point<f64>, radius: f64) -> Vec<(NodeIndex, f64)> {
        let origin = [point.x(), point.y()];
        let limit = radius * radius;

        self.tree
            .nearest_neighbor_iter_with_distance_2(&origin)
            .take_while(|(_, distance_2)| *distance_2 <= limit)
            .map(|(indexed, distance_2)| (indexed.data, distance_2.sqrt()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    use crate::model::network::{StopNode, WalkNode};

    fn graph_with_nodes() -> DiGraph<NetworkNode, NetworkEdge> {
        let mut graph = DiGraph::new();
        graph.add_node(NetworkNode::Walk(WalkNode {
            id: 1,
            geometry: Point::new(0.0, 0.0),
        }));
        graph.add_node(NetworkNode::Walk(WalkNode {
            id: 2,
            geometry: Point::new(100.0, 0.0),
        }));
        graph.add_node(NetworkNode::Stop(StopNode {
            stop_id: "S1".to_string(),
            name: "Stop 1".to_string(),
            geometry: Point::new(50.0, 0.0),
        }));
        graph
    }

    #[test]
    fn query_orders_by_distance() {
        let graph = graph_with_nodes();
        let index = SpatialIndex::over(&graph, |_| true);

        let hits = index.query(Point::new(10.0, 0.0), 500.0);
        assert_eq!(hits.len(), 3);
        let distances: Vec<f64> = hits.iter().map(|(_, d)| *d).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((distances[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn query_respects_radius() {
        let graph = graph_with_nodes();
        let index = SpatialIndex::over(&graph, |_| true);

        let hits = index.query(Point::new(0.0, 0.0), 60.0);
        assert_eq!(hits.len(), 2);

        assert!(index.query(Point::new(5000.0, 5000.0), 60.0).is_empty());
    }

    #[test]
    fn filter_selects_subset() {
        let graph = graph_with_nodes();
        let stops = SpatialIndex::over(&graph, NetworkNode::is_stop);
        let walks = SpatialIndex::over(&graph, |node| !node.is_stop());

        assert_eq!(stops.len(), 1);
        assert_eq!(walks.len(), 2);
    }
}
