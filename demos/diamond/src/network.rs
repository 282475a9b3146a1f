//! The six-point diamond network used by the demo.
//!
//! ```text
//!        D ──── E
//!      / | \  / |
//!     /  |  \/  |
//!    /   |  /\  |
//!   A ── B ─ C ── F
//! ```
//!
//! Bottom row spacing is 100 units; D and E sit 100 units above B and C.
//! Every segment has capacity 1, so vehicles queue visibly at the C→F
//! bottleneck.

use agv_core::{Coord, PointId};
use agv_net::{ControlPoint, Network, Segment};

fn add(net: &mut Network, name: &str, x: f64, y: f64) -> PointId {
    net.add_point(name, ControlPoint::new(Coord::new(x, y)).entry_exit())
        .expect("unique demo point names")
}

pub fn build_network() -> (Network, [PointId; 6]) {
    let mut net = Network::new();

    let a = add(&mut net, "A", 0.0, 0.0);
    let b = add(&mut net, "B", 100.0, 0.0);
    let c = add(&mut net, "C", 200.0, 0.0);
    let d = add(&mut net, "D", 100.0, 100.0);
    let e = add(&mut net, "E", 200.0, 100.0);
    let f = add(&mut net, "F", 300.0, 0.0);

    for (from, to) in [(a, b), (b, c), (c, f), (a, d), (d, e), (e, d), (d, c), (d, f), (e, c)] {
        let length = net.pos(from).distance(net.pos(to));
        net.add_segment(Segment::new(from, to, 1, length));
    }

    (net, [a, b, c, d, e, f])
}
