//! Vehicles and their next-segment decision.

use std::collections::VecDeque;

use agv_core::{PointId, SegmentId};
use agv_net::Network;
use agv_route::RoutingTable;

/// What a vehicle standing at a control point should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextSegment {
    /// The target list is exhausted: the vehicle is at its destination.
    Arrived,
    /// The routing table has no usable entry toward `dest` — either the key
    /// is absent or the nominated hop has no matching segment.
    NoRoute { dest: PointId },
    /// The segment to request next.
    Segment(SegmentId),
}

/// An AGV moving through the network.
///
/// Created by the host, handed to the engine with
/// [`Engine::request_to_enter`](crate::Engine::request_to_enter), and
/// returned on [`Engine::exit`](crate::Engine::exit).  While registered, the
/// engine owns it and mutates the occupancy fields; observers only ever see
/// the vehicle's id.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub name: String,
    /// Distance units per time unit.  Must be positive.
    pub speed: f64,
    /// Capacity claimed while occupying a segment.  Must be positive.
    pub capacity_needed: u32,

    /// Segment currently occupied (traversing or parked in `out_pending`).
    pub current_segment: Option<SegmentId>,
    /// Segment in whose `in_pending` this vehicle is staged, if blocked.
    pub pending_segment: Option<SegmentId>,
    /// At rest; the next traversal pays the cold-start delay.
    pub is_stopped: bool,

    /// Control points still to visit, in order.  Empty means arrived.
    pub targets: VecDeque<PointId>,
}

impl Vehicle {
    /// A unit-capacity vehicle.
    pub fn new(name: impl Into<String>, speed: f64, targets: impl IntoIterator<Item = PointId>) -> Self {
        Self {
            name: name.into(),
            speed,
            capacity_needed: 1,
            current_segment: None,
            pending_segment: None,
            is_stopped: true,
            targets: targets.into_iter().collect(),
        }
    }

    pub fn with_capacity_needed(mut self, capacity_needed: u32) -> Self {
        self.capacity_needed = capacity_needed;
        self
    }

    /// Decide the next segment from `at`.
    ///
    /// Stale targets (leading entries equal to `at`) are collapsed first, so
    /// a vehicle whose target list head is its current control point simply
    /// advances to the next target without choosing a segment.
    pub fn next_segment(&mut self, at: PointId, table: &RoutingTable, network: &Network) -> NextSegment {
        while self.targets.front() == Some(&at) {
            self.targets.pop_front();
        }
        let Some(&dest) = self.targets.front() else {
            return NextSegment::Arrived;
        };
        match table.next_hop(at, dest) {
            Some(hop) => match network.segment_between(at, hop) {
                Some(segment) => NextSegment::Segment(segment),
                // The table nominates a hop the network has no segment for.
                None => NextSegment::NoRoute { dest },
            },
            None => NextSegment::NoRoute { dest },
        }
    }

    /// Pop the head target if it equals `point`.  Intermediate entries are
    /// never skipped.
    pub fn remove_target(&mut self, point: PointId) {
        if self.targets.front() == Some(&point) {
            self.targets.pop_front();
        }
    }

    /// Has the vehicle consumed its whole target list?
    pub fn arrived(&self) -> bool {
        self.targets.is_empty()
    }
}
