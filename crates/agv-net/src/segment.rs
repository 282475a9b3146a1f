//! Directed, capacity-limited path segments.

use std::collections::VecDeque;

use agv_core::{PointId, SegmentId, SimTime, VehicleId};

/// A directed edge between two control points, with bounded concurrent
/// occupancy.
///
/// The static fields (`start`, `end`, `total_capacity`, `length`, `lanes`)
/// are fixed at construction.  The dynamic fields are mutated only by the
/// movement engine, one event at a time:
///
/// - `remaining_capacity` always satisfies
///   `0 <= remaining_capacity <= total_capacity`; the difference is the
///   summed `capacity_needed` of vehicles in traversal plus those parked in
///   `out_pending`.
/// - `out_pending` holds vehicles that finished traversal but have not yet
///   departed, in completion order.  Only the front vehicle may be staged
///   into a downstream segment's `in_pending` (no overtaking).
/// - `in_pending` holds `(vehicle, upstream_segment)` entries: each is the
///   front of that upstream segment's `out_pending`, blocked waiting for
///   room here.
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: PointId,
    pub end:   PointId,

    /// Summed `capacity_needed` of vehicles permitted concurrently.
    pub total_capacity: u32,
    /// Capacity not currently claimed by an occupying vehicle.
    pub remaining_capacity: u32,
    /// Physical length, in the same distance units as vehicle speed.
    pub length: f64,
    /// Informational only; never consulted by the engine.
    pub lanes: u32,

    /// Clock value of the most recent admission into this segment.
    pub enter_stamp: SimTime,
    /// Clock value of the most recent departure into this segment.
    pub depart_stamp: SimTime,
    /// True while a vehicle staged on this segment is blocked downstream by
    /// the smoothing rule.
    pub is_congested: bool,

    /// Vehicles done traversing, waiting (FIFO) to depart downstream.
    pub out_pending: VecDeque<VehicleId>,
    /// Blocked upstream front-runners waiting (FIFO) for room here.
    pub in_pending: VecDeque<(VehicleId, SegmentId)>,
}

impl Segment {
    /// A single-lane segment with all capacity available.
    ///
    /// Time stamps start at [`SimTime::DISTANT_PAST`] so the first admission
    /// is never delayed by the smoothing rule.
    pub fn new(start: PointId, end: PointId, total_capacity: u32, length: f64) -> Self {
        Self {
            start,
            end,
            total_capacity,
            remaining_capacity: total_capacity,
            length,
            lanes: 1,
            enter_stamp:  SimTime::DISTANT_PAST,
            depart_stamp: SimTime::DISTANT_PAST,
            is_congested: false,
            out_pending: VecDeque::new(),
            in_pending:  VecDeque::new(),
        }
    }

    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes;
        self
    }

    /// Capacity currently claimed by occupying vehicles.
    #[inline]
    pub fn occupancy(&self) -> u32 {
        self.total_capacity - self.remaining_capacity
    }

    /// Can a vehicle claiming `needed` capacity be admitted right now?
    #[inline]
    pub fn has_room_for(&self, needed: u32) -> bool {
        self.remaining_capacity >= needed
    }
}
