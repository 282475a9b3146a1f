//! JSON network loader.
//!
//! # Document format
//!
//! A top-level `points` array; one entry per control point:
//!
//! ```json
//! {
//!   "points": [
//!     {
//!       "id": "P001",
//!       "x": 12.5, "y": -3.0,
//!       "region": "north-hall",
//!       "meta": { "kind": "charger" },
//!       "inout": true,
//!       "next": ["P002", "P014"]
//!     }
//!   ]
//! }
//! ```
//!
//! `next` lists the forward neighbors by id; one segment is created per
//! entry, with length set to the Euclidean distance between the two points
//! and capacity/lanes at their defaults.  Fields not listed above are
//! ignored.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use agv_core::Coord;

use crate::network::{ControlPoint, Network};
use crate::segment::Segment;
use crate::{NetError, NetResult};

/// Capacity assigned to segments created by the loader.  The document format
/// carries no per-segment fields, so every loaded segment admits one
/// unit-capacity vehicle at a time.
pub const DEFAULT_SEGMENT_CAPACITY: u32 = 1;

// ── Document records ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NetworkDocument {
    points: Vec<PointRecord>,
}

#[derive(Deserialize)]
struct PointRecord {
    id: String,
    x:  f64,
    y:  f64,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    meta: Option<MetaRecord>,
    #[serde(default)]
    inout: bool,
    #[serde(default)]
    next: Vec<String>,
}

#[derive(Deserialize)]
struct MetaRecord {
    #[serde(default)]
    kind: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Network`] from a JSON file.
pub fn load_network_json(path: &Path) -> NetResult<Network> {
    let file = std::fs::File::open(path)?;
    load_network_reader(std::io::BufReader::new(file))
}

/// Like [`load_network_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded documents.
pub fn load_network_reader<R: Read>(reader: R) -> NetResult<Network> {
    let doc: NetworkDocument = serde_json::from_reader(reader)?;
    let mut network = Network::new();

    // First pass: register every point so forward references in `next`
    // resolve regardless of document order.
    for record in &doc.points {
        let mut point = ControlPoint::new(Coord::new(record.x, record.y));
        point.inout = record.inout;
        point.region = record.region.clone();
        point.kind = record.meta.as_ref().and_then(|m| m.kind.clone());
        network.add_point(record.id.clone(), point)?;
    }

    // Second pass: one segment per forward neighbor.
    for record in &doc.points {
        let from = network
            .point_id(&record.id)
            .expect("registered in first pass");
        for neighbor in &record.next {
            let to = network
                .point_id(neighbor)
                .ok_or_else(|| NetError::UnknownPoint(neighbor.clone()))?;
            let length = network.pos(from).distance(network.pos(to));
            network.add_segment(Segment::new(from, to, DEFAULT_SEGMENT_CAPACITY, length));
        }
    }

    Ok(network)
}
