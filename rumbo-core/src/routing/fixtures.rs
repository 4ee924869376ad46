//! Hand-built networks shared by the routing tests
//!
//! Coordinates are plain meters on a flat plane. The default walking
//! radius (300 s of direct walking) covers 250 m, so nodes are placed
//! either inside or deliberately outside that catchment.

use geo::Point;

use crate::model::{NetworkBuilder, TransitNetwork};

pub(crate) fn p(x: f64, y: f64) -> Point<f64> {
    Point::new(x, y)
}

/// One direct bus line, stops 300 m from each endpoint, 10-minute headway,
/// 18-minute ride. Access is routed over walk links at on-path speed.
pub(crate) fn direct_bus_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a = builder.add_stop("A", "Stop A", p(300.0, 0.0));
    let b = builder.add_stop("B", "Stop B", p(3700.0, 0.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a, 300.0).unwrap();
    builder.link_walk(b, w1, 300.0).unwrap();

    let route = builder.add_route("R10", "10", "Centro - Periferia", Some("#cc0000"), &[
        600, 600, 600,
    ]);
    let shape = builder.add_shape(route, "R10-east", Some("Periferia")).unwrap();
    builder.add_transit_edge(a, b, shape, Some(1080)).unwrap();

    builder.build()
}

/// Direct bus plus a nominally much faster line whose hop has no recorded
/// schedule and must stay untraversed.
pub(crate) fn gapped_schedule_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a = builder.add_stop("A", "Stop A", p(300.0, 0.0));
    let b = builder.add_stop("B", "Stop B", p(3700.0, 0.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a, 300.0).unwrap();
    builder.link_walk(b, w1, 300.0).unwrap();

    let slow = builder.add_route("R10", "10", "Centro - Periferia", None, &[600, 600, 600]);
    let slow_shape = builder.add_shape(slow, "R10-east", None).unwrap();
    builder.add_transit_edge(a, b, slow_shape, Some(1080)).unwrap();

    let fast = builder.add_route("R99", "99", "Expreso", None, &[60, 60]);
    let fast_shape = builder.add_shape(fast, "R99-east", None).unwrap();
    builder.add_transit_edge(a, b, fast_shape, None).unwrap();

    builder.build()
}

/// One line calling at an intermediate stop; both hops share the shape.
pub(crate) fn three_stop_line_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a = builder.add_stop("A", "Stop A", p(300.0, 0.0));
    let m = builder.add_stop("M", "Stop M", p(2000.0, 0.0));
    let b = builder.add_stop("B", "Stop B", p(3700.0, 0.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a, 300.0).unwrap();
    builder.link_walk(b, w1, 300.0).unwrap();

    let route = builder.add_route("R10", "10", "Centro - Periferia", None, &[600, 600, 600]);
    let shape = builder.add_shape(route, "R10-east", None).unwrap();
    builder.add_transit_edge(a, m, shape, Some(540)).unwrap();
    builder.add_transit_edge(m, b, shape, Some(540)).unwrap();

    builder.build()
}

/// Two lines joined at an interchange stop: a 400 s headway feeder and a
/// 200 s headway connector.
pub(crate) fn transfer_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let s1 = builder.add_stop("S1", "First Street", p(100.0, 0.0));
    let s2 = builder.add_stop("S2", "Interchange", p(2000.0, 0.0));
    let s3 = builder.add_stop("S3", "Terminus", p(2000.0, 1800.0));
    let w1 = builder.add_walk_node(2, p(2000.0, 1900.0));
    builder.link_walk(w0, s1, 100.0).unwrap();
    builder.link_walk(s3, w1, 100.0).unwrap();

    let feeder = builder.add_route("R1", "1", "Feeder", None, &[400, 400]);
    let feeder_shape = builder.add_shape(feeder, "R1-a", None).unwrap();
    builder.add_transit_edge(s1, s2, feeder_shape, Some(600)).unwrap();

    let connector = builder.add_route("R2", "2", "Connector", None, &[200, 200]);
    let connector_shape = builder.add_shape(connector, "R2-a", None).unwrap();
    builder
        .add_transit_edge(s2, s3, connector_shape, Some(500))
        .unwrap();

    builder.build()
}

/// Two walk nodes 150 m apart, no transit at all.
pub(crate) fn walk_only_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let w1 = builder.add_walk_node(2, p(150.0, 0.0));
    builder.link_walk(w0, w1, 150.0).unwrap();
    builder.build()
}

/// Two parallel lines between the same catchments: a rare express and a
/// slower but frequent local.
pub(crate) fn two_line_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a1 = builder.add_stop("A1", "Express Origin", p(100.0, 0.0));
    let a2 = builder.add_stop("A2", "Local Origin", p(100.0, 50.0));
    let b1 = builder.add_stop("B1", "Express End", p(3900.0, 0.0));
    let b2 = builder.add_stop("B2", "Local End", p(3900.0, 50.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a1, 100.0).unwrap();
    builder.link_walk(w0, a2, 120.0).unwrap();
    builder.link_walk(b1, w1, 100.0).unwrap();
    builder.link_walk(b2, w1, 120.0).unwrap();

    let express = builder.add_route("EXP", "E", "Express", None, &[900, 900]);
    let express_shape = builder.add_shape(express, "EXP-a", None).unwrap();
    builder.add_transit_edge(a1, b1, express_shape, Some(900)).unwrap();

    let local = builder.add_route("LOC", "L", "Local", None, &[300, 300]);
    let local_shape = builder.add_shape(local, "LOC-a", None).unwrap();
    builder.add_transit_edge(a2, b2, local_shape, Some(1400)).unwrap();

    builder.build()
}

/// Two first-leg lines feeding the same connecting line: exercises the
/// difference between first-leg and all-legs exclusion.
pub(crate) fn branching_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a = builder.add_stop("A", "Origin Stop", p(100.0, 0.0));
    let b = builder.add_stop("B", "Junction", p(2000.0, 0.0));
    let c = builder.add_stop("C", "Far Stop", p(3900.0, 0.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a, 100.0).unwrap();
    builder.link_walk(c, w1, 100.0).unwrap();

    let fast_feeder = builder.add_route("E1", "E1", "Fast Feeder", None, &[300, 300]);
    let fast_shape = builder.add_shape(fast_feeder, "E1-a", None).unwrap();
    builder.add_transit_edge(a, b, fast_shape, Some(600)).unwrap();

    let slow_feeder = builder.add_route("E2", "E2", "Slow Feeder", None, &[300, 300]);
    let slow_shape = builder.add_shape(slow_feeder, "E2-a", None).unwrap();
    builder.add_transit_edge(a, b, slow_shape, Some(700)).unwrap();

    let connector = builder.add_route("CX", "CX", "Connector", None, &[300, 300]);
    let connector_shape = builder.add_shape(connector, "CX-a", None).unwrap();
    builder
        .add_transit_edge(b, c, connector_shape, Some(600))
        .unwrap();

    builder.build()
}

/// One route running two shapes over the same stop pair; alternatives found
/// on the second shape are duplicates by route sequence.
pub(crate) fn twin_shape_network() -> TransitNetwork {
    let mut builder = NetworkBuilder::new();
    let w0 = builder.add_walk_node(1, p(0.0, 0.0));
    let a = builder.add_stop("A", "Stop A", p(300.0, 0.0));
    let b = builder.add_stop("B", "Stop B", p(3700.0, 0.0));
    let w1 = builder.add_walk_node(2, p(4000.0, 0.0));
    builder.link_walk(w0, a, 300.0).unwrap();
    builder.link_walk(b, w1, 300.0).unwrap();

    let route = builder.add_route("R10", "10", "Centro - Periferia", None, &[600, 600, 600]);
    let short_shape = builder.add_shape(route, "R10-a", None).unwrap();
    builder.add_transit_edge(a, b, short_shape, Some(1080)).unwrap();
    let long_shape = builder.add_shape(route, "R10-b", None).unwrap();
    builder.add_transit_edge(a, b, long_shape, Some(1200)).unwrap();

    builder.build()
}
