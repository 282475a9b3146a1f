//! Unit tests for agv-net.

use agv_core::{Coord, PointId, SimTime};

use crate::network::{ControlPoint, Network};
use crate::segment::Segment;
use crate::NetError;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn grid_network() -> (Network, PointId, PointId, PointId) {
    let mut net = Network::new();
    let a = net.add_point("A", ControlPoint::new(Coord::new(0.0, 0.0)).entry_exit()).unwrap();
    let b = net.add_point("B", ControlPoint::new(Coord::new(100.0, 0.0))).unwrap();
    let c = net.add_point("C", ControlPoint::new(Coord::new(200.0, 0.0)).entry_exit()).unwrap();
    net.add_segment(Segment::new(a, b, 1, 100.0));
    net.add_segment(Segment::new(b, c, 1, 100.0));
    (net, a, b, c)
}

#[cfg(test)]
mod network {
    use super::*;

    #[test]
    fn name_mapping_is_bidirectional() {
        let (net, a, _, _) = grid_network();
        assert_eq!(net.point_id("A"), Some(a));
        assert_eq!(net.point_name(a), "A");
        assert_eq!(net.point_id("Z"), None);
    }

    #[test]
    fn duplicate_point_name_rejected() {
        let mut net = Network::new();
        net.add_point("A", ControlPoint::default()).unwrap();
        assert!(matches!(
            net.add_point("A", ControlPoint::default()),
            Err(NetError::DuplicatePoint(_))
        ));
    }

    #[test]
    fn add_segment_is_idempotent() {
        let (mut net, a, b, _) = grid_network();
        let existing = net.segment_between(a, b).unwrap();
        // The duplicate carries a different capacity; the original must win.
        let got = net.add_segment(Segment::new(a, b, 9, 50.0));
        assert_eq!(got, existing);
        assert_eq!(net.segment(existing).total_capacity, 1);
        assert_eq!(net.segment(existing).length, 100.0);
        assert_eq!(net.segment_count(), 2);
    }

    #[test]
    fn get_segment_reports_missing_pair() {
        let (net, a, _, c) = grid_network();
        assert!(net.get_segment(a, c).is_err());
        assert!(!net.segment_exists(a, c));
        assert!(net.segment_exists(a, PointId(1)));
    }

    #[test]
    fn segments_iterate_in_insertion_order() {
        let (net, a, b, c) = grid_network();
        let pairs: Vec<_> = net.segments().map(|(_, s)| (s.start, s.end)).collect();
        assert_eq!(pairs, vec![(a, b), (b, c)]);
    }

    #[test]
    fn out_segments_per_point() {
        let (mut net, a, b, c) = grid_network();
        net.add_segment(Segment::new(a, c, 1, 200.0));
        assert_eq!(net.out_segments(a).len(), 2);
        assert_eq!(net.out_segments(b).len(), 1);
        assert_eq!(net.out_segments(c).len(), 0);
    }

    #[test]
    fn entry_exit_points_ascending() {
        let (net, a, _, c) = grid_network();
        assert_eq!(net.entry_exit_points(), vec![a, c]);
    }
}

#[cfg(test)]
mod segment {
    use super::*;

    #[test]
    fn fresh_segment_has_full_capacity() {
        let s = Segment::new(PointId(0), PointId(1), 3, 42.0);
        assert_eq!(s.remaining_capacity, 3);
        assert_eq!(s.occupancy(), 0);
        assert!(s.has_room_for(3));
        assert!(!s.has_room_for(4));
        assert_eq!(s.lanes, 1);
    }

    #[test]
    fn stamps_start_in_the_distant_past() {
        let s = Segment::new(PointId(0), PointId(1), 1, 1.0);
        assert!(SimTime::ZERO - s.enter_stamp > 1e12);
        assert!(SimTime::ZERO - s.depart_stamp > 1e12);
        assert!(!s.is_congested);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::load_network_reader;

    const DOC: &str = r#"{
        "points": [
            { "id": "A", "x": 0.0, "y": 0.0, "region": "dock", "inout": true,
              "next": ["B"], "color": "ignored" },
            { "id": "B", "x": 3.0, "y": 4.0, "region": "aisle",
              "meta": { "kind": "junction", "note": "ignored" },
              "inout": false, "next": ["A"] }
        ]
    }"#;

    #[test]
    fn parses_points_and_segments() {
        let net = load_network_reader(Cursor::new(DOC)).unwrap();
        assert_eq!(net.point_count(), 2);
        assert_eq!(net.segment_count(), 2);

        let a = net.point_id("A").unwrap();
        let b = net.point_id("B").unwrap();
        assert!(net.point(a).inout);
        assert!(!net.point(b).inout);
        assert_eq!(net.point(b).kind.as_deref(), Some("junction"));
        assert_eq!(net.point(a).region.as_deref(), Some("dock"));

        // Segment length is the Euclidean distance between the endpoints.
        let ab = net.get_segment(a, b).unwrap();
        assert_eq!(ab.length, 5.0);
        assert_eq!(ab.total_capacity, 1);
    }

    #[test]
    fn forward_references_resolve() {
        // "A" lists "B" before "B" is declared — must still load.
        let doc = r#"{ "points": [
            { "id": "A", "x": 0, "y": 0, "next": ["B"] },
            { "id": "B", "x": 1, "y": 0, "next": [] }
        ]}"#;
        let net = load_network_reader(Cursor::new(doc)).unwrap();
        assert_eq!(net.segment_count(), 1);
    }

    #[test]
    fn unknown_neighbor_is_an_error() {
        let doc = r#"{ "points": [
            { "id": "A", "x": 0, "y": 0, "next": ["GHOST"] }
        ]}"#;
        let err = load_network_reader(Cursor::new(doc)).unwrap_err();
        assert!(matches!(err, crate::NetError::UnknownPoint(n) if n == "GHOST"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(load_network_reader(Cursor::new("{ not json")).is_err());
    }
}
