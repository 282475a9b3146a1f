//! Engine observer trait for metrics and logging.

use agv_core::{PointId, SegmentId, SimTime, VehicleId};

/// Callbacks fired synchronously by the engine at each state-machine
/// transition.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Payloads are copies; handlers must not
/// call back into mutating engine operations — the one sanctioned re-entry
/// is calling [`Engine::exit`](crate::Engine::exit) from the host loop after
/// `on_ready_to_exit` fired.
pub trait EngineObserver {
    /// A vehicle was admitted into the network at `point`.
    fn on_enter(&mut self, _at: SimTime, _vehicle: VehicleId, _point: PointId) {}

    /// A vehicle started occupying `segment` (initial entry or handoff).
    fn on_arrive(&mut self, _at: SimTime, _vehicle: VehicleId, _segment: SegmentId) {}

    /// A vehicle finished traversing `segment` and joined its `out_pending`.
    fn on_complete(&mut self, _at: SimTime, _vehicle: VehicleId, _segment: SegmentId) {}

    /// A vehicle left `segment` toward its next segment.
    fn on_depart(&mut self, _at: SimTime, _vehicle: VehicleId, _segment: SegmentId) {}

    /// A vehicle reached its destination at `point` and awaits `exit`.
    fn on_ready_to_exit(&mut self, _at: SimTime, _vehicle: VehicleId, _point: PointId) {}

    /// No usable route from `from` toward `dest`; the vehicle stalls.
    fn on_routing_miss(&mut self, _at: SimTime, _vehicle: VehicleId, _from: PointId, _dest: PointId) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

/// Fans every event out to a list of boxed observers in registration order.
#[derive(Default)]
pub struct MultiObserver {
    observers: Vec<Box<dyn EngineObserver>>,
}

impl MultiObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl EngineObserver for MultiObserver {
    fn on_enter(&mut self, at: SimTime, vehicle: VehicleId, point: PointId) {
        for o in &mut self.observers {
            o.on_enter(at, vehicle, point);
        }
    }

    fn on_arrive(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        for o in &mut self.observers {
            o.on_arrive(at, vehicle, segment);
        }
    }

    fn on_complete(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        for o in &mut self.observers {
            o.on_complete(at, vehicle, segment);
        }
    }

    fn on_depart(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        for o in &mut self.observers {
            o.on_depart(at, vehicle, segment);
        }
    }

    fn on_ready_to_exit(&mut self, at: SimTime, vehicle: VehicleId, point: PointId) {
        for o in &mut self.observers {
            o.on_ready_to_exit(at, vehicle, point);
        }
    }

    fn on_routing_miss(&mut self, at: SimTime, vehicle: VehicleId, from: PointId, dest: PointId) {
        for o in &mut self.observers {
            o.on_routing_miss(at, vehicle, from, dest);
        }
    }
}
