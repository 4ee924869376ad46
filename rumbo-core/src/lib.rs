//! Core routing engine for multimodal (walking + public transit) journey
//! planning over a prebuilt combined network.
//!
//! The crate consumes graphs assembled elsewhere (GTFS and street-network
//! loaders), searches the fastest walk+transit paths between two projected
//! coordinates and returns up to a handful of materially different
//! itineraries ranked by total time. Waiting time is derived from route
//! headways, so infrequent services carry their real cost.

pub mod costing;
pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{
    NetworkBuilder, NetworkEdge, NetworkNode, RouteInfo, ShapeInfo, SpatialIndex, StopNode,
    TransitEdge, TransitNetwork, WalkEdge, WalkNode,
};
pub use routing::{
    Endpoint, ExclusionPolicy, Itinerary, PlanOptions, Segment, TransitSegment, WalkSegment,
    plan_route, plan_route_many,
};

/// Durations and cumulative costs, in seconds
pub type Time = u32;
/// Index into the network's route table
pub type RouteId = usize;
/// Index into the network's trip shape table
pub type ShapeId = usize;
