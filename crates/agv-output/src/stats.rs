//! Per-vehicle travel metrics accumulated from engine events.

use rustc_hash::FxHashMap;

use agv_core::{PointId, SegmentId, SimTime, VehicleId};
use agv_engine::EngineObserver;
use agv_net::Network;

/// Trip metrics for one vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripStats {
    /// Clock value of `on_enter`; `None` while still pending entry.
    pub entered: Option<f64>,
    /// Clock value of `on_ready_to_exit`; `None` while still travelling.
    pub ready: Option<f64>,
    /// Summed length of every segment the vehicle started occupying.
    pub distance: f64,
    /// Number of segments occupied.
    pub segments: u32,
}

impl TripStats {
    /// Enter-to-ready duration, once both ends are known.
    pub fn travel_time(&self) -> Option<f64> {
        Some(self.ready? - self.entered?)
    }
}

/// Aggregate over all completed trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub completed:        usize,
    pub total_distance:   f64,
    pub mean_travel_time: f64,
    pub routing_misses:   usize,
}

/// An [`EngineObserver`] accumulating per-vehicle trip metrics.
///
/// Segment lengths are snapshotted at construction so the observer does not
/// borrow the network while the engine owns it.
pub struct TravelStats {
    lengths: Vec<f64>,
    trips:   FxHashMap<VehicleId, TripStats>,
    misses:  usize,
}

impl TravelStats {
    pub fn new(network: &Network) -> Self {
        Self {
            lengths: network.segments().map(|(_, s)| s.length).collect(),
            trips:   FxHashMap::default(),
            misses:  0,
        }
    }

    pub fn trip(&self, vehicle: VehicleId) -> Option<&TripStats> {
        self.trips.get(&vehicle)
    }

    /// Trips sorted by vehicle id.
    pub fn trips(&self) -> Vec<(VehicleId, TripStats)> {
        let mut all: Vec<_> = self.trips.iter().map(|(&v, &t)| (v, t)).collect();
        all.sort_by_key(|(v, _)| *v);
        all
    }

    pub fn summary(&self) -> StatsSummary {
        let completed: Vec<f64> = self
            .trips
            .values()
            .filter_map(TripStats::travel_time)
            .collect();
        let mean = if completed.is_empty() {
            0.0
        } else {
            completed.iter().sum::<f64>() / completed.len() as f64
        };
        StatsSummary {
            completed:        completed.len(),
            total_distance:   self.trips.values().map(|t| t.distance).sum(),
            mean_travel_time: mean,
            routing_misses:   self.misses,
        }
    }
}

impl EngineObserver for TravelStats {
    fn on_enter(&mut self, at: SimTime, vehicle: VehicleId, _point: PointId) {
        self.trips.entry(vehicle).or_default().entered = Some(at.0);
    }

    fn on_arrive(&mut self, _at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        let trip = self.trips.entry(vehicle).or_default();
        trip.distance += self.lengths.get(segment.index()).copied().unwrap_or(0.0);
        trip.segments += 1;
    }

    fn on_ready_to_exit(&mut self, at: SimTime, vehicle: VehicleId, _point: PointId) {
        self.trips.entry(vehicle).or_default().ready = Some(at.0);
    }

    fn on_routing_miss(&mut self, _at: SimTime, _vehicle: VehicleId, _from: PointId, _dest: PointId) {
        self.misses += 1;
    }
}
