//! Data model for the combined walking and transit network
//!
//! Contains the graph types, route and shape tables, spatial indices and
//! the builder that assembles them into a shareable read-only context.

pub mod builder;
pub mod network;
pub mod spatial;

pub use builder::NetworkBuilder;
pub use network::{
    NetworkEdge, NetworkNode, RouteInfo, ShapeInfo, StopNode, TransitEdge, TransitNetwork,
    WalkEdge, WalkNode,
};
pub use spatial::{IndexedPoint, SpatialIndex};
