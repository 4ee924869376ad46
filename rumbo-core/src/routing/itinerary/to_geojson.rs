//! GeoJSON export of itineraries for the map layer
//!
//! Coordinates stay in the network's projected CRS; reprojection belongs to
//! the caller that owns the projection.

use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use super::{Itinerary, Segment, TransitSegment, WalkSegment};

impl Itinerary {
    /// Convert the itinerary to a `GeoJSON` `FeatureCollection`, one
    /// feature per segment
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .segments
            .iter()
            .enumerate()
            .map(|(idx, segment)| match segment {
                Segment::Walk(walk) => walk_feature(walk, idx),
                Segment::Transit(transit) => transit_feature(transit, idx),
            })
            .collect();

        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> String {
        serde_json::to_string(&self.to_geojson()).unwrap_or_default()
    }
}

fn segment_linestring(from: Point<f64>, via: &[Point<f64>], to: Point<f64>) -> LineString {
    let mut coordinates = Vec::with_capacity(via.len() + 2);
    coordinates.push((from.x(), from.y()));
    coordinates.extend(via.iter().map(|point| (point.x(), point.y())));
    coordinates.push((to.x(), to.y()));
    coordinates.into()
}

fn walk_feature(leg: &WalkSegment, leg_idx: usize) -> Feature {
    let line = segment_linestring(leg.from.location, &leg.via, leg.to.location);

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new((&line).into()),
        "properties": {
            "leg_type": "walk",
            "leg_index": leg_idx,
            "from_name": leg.from.name.clone().unwrap_or_default(),
            "to_name": leg.to.name.clone().unwrap_or_default(),
            "duration": leg.duration,
        }
    });

    serde_json::from_value(value).unwrap()
}

fn transit_feature(leg: &TransitSegment, leg_idx: usize) -> Feature {
    let line = segment_linestring(leg.from.location, &leg.via, leg.to.location);

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new((&line).into()),
        "properties": {
            "leg_type": "transit",
            "leg_index": leg_idx,
            "route_name": leg.route_name,
            "route_color": leg.route_color,
            "headsign": leg.headsign,
            "from_name": leg.from.name.clone().unwrap_or_default(),
            "to_name": leg.to.name.clone().unwrap_or_default(),
            "stops": leg.stops,
            "wait": leg.wait,
            "duration": leg.duration,
        }
    });

    serde_json::from_value(value).unwrap()
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use crate::routing::fixtures;
    use crate::routing::itinerary::build_itinerary;
    use crate::routing::options::PlanOptions;
    use crate::routing::search::multi_start_search;

    #[test]
    fn one_feature_per_segment() {
        let network = fixtures::direct_bus_network();
        let options = PlanOptions::default();
        let origin = fixtures::p(0.0, 0.0);
        let destination = fixtures::p(4000.0, 0.0);

        let trace =
            multi_start_search(&network, origin, destination, &HashSet::new(), &options).unwrap();
        let itinerary = build_itinerary(&network, origin, destination, &trace, &options).unwrap();

        let collection = itinerary.to_geojson();
        assert_eq!(collection.features.len(), itinerary.segments.len());

        let first = &collection.features[0];
        let properties = first.properties.as_ref().unwrap();
        assert_eq!(properties["leg_type"], "walk");

        let ride = &collection.features[1];
        let properties = ride.properties.as_ref().unwrap();
        assert_eq!(properties["leg_type"], "transit");
        assert_eq!(properties["route_name"], "10");
        assert_eq!(properties["wait"], 600);

        assert!(!itinerary.to_geojson_string().is_empty());
    }
}
