// Re-export of the public surface for callers

pub use crate::error::Error;
pub use crate::model::{NetworkBuilder, TransitNetwork};
pub use crate::routing::{
    ExclusionPolicy, Itinerary, PlanOptions, Segment, plan_route, plan_route_many,
};

// Core scalar types
pub use crate::RouteId;
pub use crate::ShapeId;
pub use crate::Time;
