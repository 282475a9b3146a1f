//! The movement engine: a discrete-event state machine over segments and
//! vehicles.
//!
//! # Event model
//!
//! All waiting is expressed on the event queue; a transition runs to
//! completion before the next event fires, so every mutation here is atomic
//! with respect to the simulated clock.  The transitions are:
//!
//! | Event                  | Work                                            |
//! |------------------------|-------------------------------------------------|
//! | `AttemptEnter(cp)`     | FIFO scan of the entry-pending list at `cp`     |
//! | `Complete(v, p)`       | `v` finishes traversing `p`, joins `out_pending`|
//! | `AttemptDepart(p, v?)` | try to discharge the `out_pending` head of `p`  |
//!
//! # Backward propagation
//!
//! A blocked `out_pending` head takes a slot in the downstream segment's
//! `in_pending`; releasing capacity downstream (on depart or exit) wakes
//! exactly that staged head.  Departing also promotes the *new* head of the
//! upstream queue into the downstream `in_pending`, so the chain of blocked
//! segments unwinds one vehicle per release without ever reordering a queue.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use agv_core::{EngineConfig, PointId, SegmentId, SimTime, VehicleId};
use agv_net::Network;
use agv_route::RoutingTable;

use crate::observer::EngineObserver;
use crate::sched::{Event, EventQueue};
use crate::vehicle::{NextSegment, Vehicle};
use crate::{EngineError, EngineResult};

// ── ReadyVehicle ──────────────────────────────────────────────────────────────

/// A vehicle that has reached its destination and awaits the host's `exit`
/// call.  `segment` is the segment it is still occupying — `None` when the
/// vehicle went ready at its entry point without ever occupying one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyVehicle {
    pub vehicle: VehicleId,
    pub segment: Option<SegmentId>,
    pub point:   PointId,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Owns the network's dynamic state, the registered vehicles, and the event
/// queue, and advances them under the discrete-event clock.
pub struct Engine {
    network: Network,
    table:   RoutingTable,
    config:  EngineConfig,

    vehicles:     FxHashMap<VehicleId, Vehicle>,
    next_vehicle: u32,

    queue:         EventQueue,
    entry_pending: FxHashMap<PointId, VecDeque<VehicleId>>,
    ready:         Vec<ReadyVehicle>,

    /// `(vehicle, point)` pairs whose routing miss was already reported, so
    /// a stalled vehicle does not flood the sink on every rescan.
    reported_misses: FxHashSet<(VehicleId, PointId)>,
}

impl Engine {
    pub fn new(network: Network, table: RoutingTable, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            network,
            table,
            config,
            vehicles: FxHashMap::default(),
            next_vehicle: 0,
            queue: EventQueue::new(),
            entry_pending: FxHashMap::default(),
            ready: Vec::new(),
            reported_misses: FxHashSet::default(),
        })
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// The clock value of the most recently executed event.
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Iterate over all registered vehicles in unspecified order.
    pub fn vehicles(&self) -> impl Iterator<Item = (VehicleId, &Vehicle)> {
        self.vehicles.iter().map(|(&id, v)| (id, v))
    }

    /// Vehicles currently awaiting the host's [`exit`](Self::exit) call.
    pub fn ready(&self) -> &[ReadyVehicle] {
        &self.ready
    }

    pub fn events_pending(&self) -> usize {
        self.queue.len()
    }

    // ── Public operations ─────────────────────────────────────────────────

    /// Submit a vehicle for admission at `point`.
    ///
    /// The vehicle joins the entry-pending list and an admission scan is
    /// scheduled.  If its targets collapse to the entry point itself it is
    /// handed straight to the ready-to-exit list without occupying any
    /// segment, and `on_ready_to_exit` fires immediately.
    pub fn request_to_enter(
        &mut self,
        vehicle: Vehicle,
        point: PointId,
        obs: &mut impl EngineObserver,
    ) -> EngineResult<VehicleId> {
        if !self.network.contains_point(point) {
            return Err(EngineError::UnknownEntryPoint(point));
        }
        if !(vehicle.speed.is_finite() && vehicle.speed > 0.0) {
            return Err(EngineError::InvalidVehicle("speed must be finite and positive"));
        }
        if vehicle.capacity_needed == 0 {
            return Err(EngineError::InvalidVehicle("capacity_needed must be positive"));
        }

        let vid = VehicleId(self.next_vehicle);
        self.next_vehicle += 1;

        let mut vehicle = vehicle;
        while vehicle.targets.front() == Some(&point) {
            vehicle.targets.pop_front();
        }

        if vehicle.targets.is_empty() {
            self.vehicles.insert(vid, vehicle);
            self.ready.push(ReadyVehicle { vehicle: vid, segment: None, point });
            obs.on_ready_to_exit(self.queue.now(), vid, point);
            return Ok(vid);
        }

        self.vehicles.insert(vid, vehicle);
        self.entry_pending.entry(point).or_default().push_back(vid);
        self.queue.schedule(self.config.chain_tick, Event::AttemptEnter(point));
        Ok(vid)
    }

    /// Remove a ready vehicle from the simulation and release its capacity.
    ///
    /// Returns the vehicle, or `None` when no matching ready pair exists
    /// (an unmatched exit is deliberately ignored).  Releasing capacity
    /// wakes the staged upstream head and re-scans the entry point.
    pub fn exit(&mut self, vehicle: VehicleId, point: PointId) -> EngineResult<Option<Vehicle>> {
        let Some(pos) = self
            .ready
            .iter()
            .position(|r| r.vehicle == vehicle && r.point == point)
        else {
            log::debug!("exit({vehicle}, {point}) matches no ready vehicle; ignored");
            return Ok(None);
        };
        let entry = self.ready.remove(pos);
        let mut gone = self
            .vehicles
            .remove(&vehicle)
            .ok_or(EngineError::UnknownVehicle(vehicle))?;

        if let Some(p) = entry.segment {
            let released = gone.capacity_needed;
            let seg = self.network.segment_mut(p);
            seg.remaining_capacity += released;
            if seg.remaining_capacity > seg.total_capacity {
                return Err(EngineError::CapacityOverflow { segment: p, vehicle, event: "exit" });
            }
            let staged = seg.in_pending.front().copied();
            let start = seg.start;
            if let Some((u, up)) = staged {
                self.queue.schedule(self.config.chain_tick, Event::AttemptDepart(up, Some(u)));
            }
            self.queue.schedule(self.config.chain_tick, Event::AttemptEnter(start));
        }

        gone.current_segment = None;
        Ok(Some(gone))
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Execute the next event.  Returns its clock value, or `None` when the
    /// queue has drained.
    pub fn step(&mut self, obs: &mut impl EngineObserver) -> EngineResult<Option<SimTime>> {
        let Some((at, event)) = self.queue.pop() else {
            return Ok(None);
        };
        match event {
            Event::AttemptEnter(cp) => self.attempt_to_enter(cp, obs)?,
            Event::Complete(v, p) => self.complete(v, p, obs)?,
            Event::AttemptDepart(p, who) => self.attempt_to_depart(p, who, obs)?,
        }
        Ok(Some(at))
    }

    /// Execute events until the next one would fire past `horizon` or the
    /// queue drains.  Ready vehicles are left for the host to `exit`.
    pub fn run_until(&mut self, horizon: SimTime, obs: &mut impl EngineObserver) -> EngineResult<SimTime> {
        while let Some(t) = self.queue.peek_time() {
            if t > horizon {
                break;
            }
            self.step(obs)?;
        }
        Ok(self.queue.now())
    }

    /// Like [`run_until`](Self::run_until), but calls [`exit`](Self::exit)
    /// for every vehicle the moment it turns ready.  Returns the exited
    /// vehicles in exit order.
    pub fn run_auto_exit(
        &mut self,
        horizon: SimTime,
        obs: &mut impl EngineObserver,
    ) -> EngineResult<Vec<Vehicle>> {
        let mut gone = Vec::new();
        loop {
            while let Some(r) = self.ready.first().copied() {
                if let Some(v) = self.exit(r.vehicle, r.point)? {
                    gone.push(v);
                }
            }
            match self.queue.peek_time() {
                Some(t) if t <= horizon => {
                    self.step(obs)?;
                }
                _ => break,
            }
        }
        while let Some(r) = self.ready.first().copied() {
            if let Some(v) = self.exit(r.vehicle, r.point)? {
                gone.push(v);
            }
        }
        Ok(gone)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// FIFO scan of the entry-pending list at `cp`.
    ///
    /// Vehicles whose next segment is full are skipped (a later vehicle with
    /// a different first hop may still fit); a successful admission or a
    /// smoothing reschedule stops the scan.
    fn attempt_to_enter(&mut self, cp: PointId, obs: &mut impl EngineObserver) -> EngineResult<()> {
        let now = self.queue.now();
        let snapshot: Vec<VehicleId> = match self.entry_pending.get(&cp) {
            Some(q) if !q.is_empty() => q.iter().copied().collect(),
            _ => return Ok(()),
        };

        for vid in snapshot {
            let vehicle = self
                .vehicles
                .get_mut(&vid)
                .ok_or(EngineError::UnknownVehicle(vid))?;
            match vehicle.next_segment(cp, &self.table, &self.network) {
                NextSegment::Arrived => {
                    // All remaining targets were the entry point itself.
                    self.remove_entry_pending(cp, vid);
                    self.ready.push(ReadyVehicle { vehicle: vid, segment: None, point: cp });
                    obs.on_ready_to_exit(now, vid, cp);
                }
                NextSegment::NoRoute { dest } => {
                    self.report_miss(vid, cp, dest, obs);
                }
                NextSegment::Segment(p) => {
                    let needed = vehicle.capacity_needed;
                    if !self.network.segment(p).has_room_for(needed) {
                        continue;
                    }
                    let gap = now - self.network.segment(p).enter_stamp;
                    if gap < self.config.smooth_factor {
                        self.queue
                            .schedule(self.config.smooth_factor - gap, Event::AttemptEnter(cp));
                        return Ok(());
                    }
                    self.enter(vid, p, cp, obs)?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Admit `vid` from `cp` into segment `p`.
    fn enter(
        &mut self,
        vid: VehicleId,
        p: SegmentId,
        cp: PointId,
        obs: &mut impl EngineObserver,
    ) -> EngineResult<()> {
        let now = self.queue.now();
        self.network.segment_mut(p).enter_stamp = now;
        obs.on_enter(now, vid, cp);
        self.remove_entry_pending(cp, vid);
        self.vehicles
            .get_mut(&vid)
            .ok_or(EngineError::UnknownVehicle(vid))?
            .is_stopped = true;
        self.arrive(vid, p, obs)
    }

    /// Begin occupying `p`: claim capacity and schedule traversal completion.
    fn arrive(&mut self, vid: VehicleId, p: SegmentId, obs: &mut impl EngineObserver) -> EngineResult<()> {
        let now = self.queue.now();
        obs.on_arrive(now, vid, p);

        let start = self.network.segment(p).start;
        let vehicle = self
            .vehicles
            .get_mut(&vid)
            .ok_or(EngineError::UnknownVehicle(vid))?;
        vehicle.current_segment = Some(p);
        vehicle.remove_target(start);

        let needed = vehicle.capacity_needed;
        let speed = vehicle.speed;
        let cold = if vehicle.is_stopped {
            vehicle.is_stopped = false;
            self.config.cold_start_delay
        } else {
            0.0
        };

        let seg = self.network.segment_mut(p);
        seg.remaining_capacity = seg
            .remaining_capacity
            .checked_sub(needed)
            .ok_or(EngineError::CapacityUnderflow { segment: p, vehicle: vid, event: "arrive" })?;

        let delay = seg.length / speed + cold;
        self.queue.schedule(delay, Event::Complete(vid, p));
        Ok(())
    }

    /// Traversal done: park in `out_pending` and try to move on.
    fn complete(&mut self, vid: VehicleId, p: SegmentId, obs: &mut impl EngineObserver) -> EngineResult<()> {
        let now = self.queue.now();
        self.network.segment_mut(p).out_pending.push_back(vid);
        obs.on_complete(now, vid, p);
        self.queue.schedule(self.config.chain_tick, Event::AttemptDepart(p, None));
        Ok(())
    }

    /// Try to discharge the `out_pending` head of `p`.
    fn attempt_to_depart(
        &mut self,
        p: SegmentId,
        who: Option<VehicleId>,
        obs: &mut impl EngineObserver,
    ) -> EngineResult<()> {
        let now = self.queue.now();

        let Some(&head) = self.network.segment(p).out_pending.front() else {
            return Ok(());
        };
        if let Some(v) = who {
            // A pinned attempt is stale once its vehicle left the queue.
            if !self.network.segment(p).out_pending.contains(&v) {
                return Ok(());
            }
            debug_assert_eq!(v, head, "only the out_pending head is ever scheduled");
        }
        let vid = head;

        let congested = self.network.segment(p).is_congested;
        let end = self.network.segment(p).end;
        let vehicle = self
            .vehicles
            .get_mut(&vid)
            .ok_or(EngineError::UnknownVehicle(vid))?;
        vehicle.is_stopped = congested;

        match vehicle.next_segment(end, &self.table, &self.network) {
            NextSegment::Arrived => {
                debug_assert!(vehicle.pending_segment.is_none());
                self.network.segment_mut(p).out_pending.pop_front();
                self.ready_to_exit(vid, p, obs);
            }
            NextSegment::NoRoute { dest } => {
                // The head stalls in place; the rest of the network keeps
                // moving.
                self.report_miss(vid, end, dest, obs);
            }
            NextSegment::Segment(q) => {
                let needed = vehicle.capacity_needed;
                if self.network.segment(q).has_room_for(needed) {
                    let gap = now - self.network.segment(q).depart_stamp;
                    if gap < self.config.smooth_factor {
                        self.network.segment_mut(p).is_congested = true;
                        self.queue.schedule(
                            self.config.smooth_factor - gap,
                            Event::AttemptDepart(p, Some(vid)),
                        );
                        return Ok(());
                    }
                    self.network.segment_mut(p).is_congested = false;
                    self.network.segment_mut(p).out_pending.pop_front();

                    // No-overtake promotion: the new head takes its place in
                    // line downstream before anyone else can.
                    self.promote_new_head(p)?;

                    // Vacate the waiting slot this vehicle held in q, if any.
                    let staged = self
                        .vehicles
                        .get_mut(&vid)
                        .ok_or(EngineError::UnknownVehicle(vid))?
                        .pending_segment
                        .take();
                    if let Some(s) = staged {
                        let removed = self.network.segment_mut(s).in_pending.pop_front();
                        debug_assert_eq!(
                            removed.map(|(w, _)| w),
                            Some(vid),
                            "a departing vehicle must head its staged queue",
                        );
                    }

                    self.depart(vid, p, q, obs)?;
                    self.network.segment_mut(q).depart_stamp = now;
                } else {
                    // q is full.  Stage the head unless it already holds a
                    // slot from an earlier promotion or scan.
                    let vehicle = self
                        .vehicles
                        .get_mut(&vid)
                        .ok_or(EngineError::UnknownVehicle(vid))?;
                    debug_assert!(
                        vehicle.pending_segment.is_none() || vehicle.pending_segment == Some(q),
                        "a staged vehicle's pending segment cannot change while it waits",
                    );
                    if vehicle.pending_segment.is_none() {
                        vehicle.pending_segment = Some(q);
                        self.network.segment_mut(q).in_pending.push_back((vid, p));
                    }
                }
            }
        }
        Ok(())
    }

    /// After a departure empties the head slot of `p`, stage the new head
    /// into its downstream segment's `in_pending`.
    fn promote_new_head(&mut self, p: SegmentId) -> EngineResult<()> {
        let Some(&w) = self.network.segment(p).out_pending.front() else {
            return Ok(());
        };
        let end = self.network.segment(p).end;
        let vehicle = self
            .vehicles
            .get_mut(&w)
            .ok_or(EngineError::UnknownVehicle(w))?;
        debug_assert!(vehicle.pending_segment.is_none(), "a non-head vehicle is never staged");
        if let NextSegment::Segment(r) = vehicle.next_segment(end, &self.table, &self.network) {
            vehicle.pending_segment = Some(r);
            self.network.segment_mut(r).in_pending.push_back((w, p));
        }
        // Arrived / NoRoute heads are handled by the chained depart attempt.
        Ok(())
    }

    /// Leave `p` and hand off onto `q` within the same event.
    fn depart(
        &mut self,
        vid: VehicleId,
        p: SegmentId,
        q: SegmentId,
        obs: &mut impl EngineObserver,
    ) -> EngineResult<()> {
        let now = self.queue.now();
        obs.on_depart(now, vid, p);

        let released = self
            .vehicles
            .get(&vid)
            .ok_or(EngineError::UnknownVehicle(vid))?
            .capacity_needed;
        let seg = self.network.segment_mut(p);
        seg.remaining_capacity += released;
        if seg.remaining_capacity > seg.total_capacity {
            return Err(EngineError::CapacityOverflow { segment: p, vehicle: vid, event: "depart" });
        }

        self.arrive(vid, q, obs)?;

        // Pull the next waiter, wake the staged upstream head, and let a
        // fresh entry contend for the freed capacity.
        self.queue.schedule(self.config.chain_tick, Event::AttemptDepart(p, None));
        let staged = self.network.segment(p).in_pending.front().copied();
        if let Some((u, up)) = staged {
            self.queue.schedule(self.config.chain_tick, Event::AttemptDepart(up, Some(u)));
        }
        let start = self.network.segment(p).start;
        self.queue.schedule(self.config.chain_tick, Event::AttemptEnter(start));
        Ok(())
    }

    /// `vid` finished its last target at the end of `p`; it keeps occupying
    /// `p` until the host calls [`exit`](Self::exit).
    fn ready_to_exit(&mut self, vid: VehicleId, p: SegmentId, obs: &mut impl EngineObserver) {
        let end = self.network.segment(p).end;
        self.ready.push(ReadyVehicle { vehicle: vid, segment: Some(p), point: end });
        obs.on_ready_to_exit(self.queue.now(), vid, end);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn remove_entry_pending(&mut self, cp: PointId, vid: VehicleId) {
        if let Some(queue) = self.entry_pending.get_mut(&cp) {
            queue.retain(|&v| v != vid);
            if queue.is_empty() {
                self.entry_pending.remove(&cp);
            }
        }
    }

    fn report_miss(
        &mut self,
        vid: VehicleId,
        from: PointId,
        dest: PointId,
        obs: &mut impl EngineObserver,
    ) {
        if self.reported_misses.insert((vid, from)) {
            log::warn!("routing miss: {vid} at {from} has no route toward {dest}");
            obs.on_routing_miss(self.queue.now(), vid, from, dest);
        }
    }
}
