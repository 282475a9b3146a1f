//! diamond — smallest runnable demo for the agvsim workspace.
//!
//! Five vehicles enter a six-point diamond network and converge on point F
//! through a capacity-1 bottleneck.  Trajectories go to
//! `output/diamond/trajectories.csv`; a per-vehicle summary prints at the
//! end.

mod network;

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use agv_core::{EngineConfig, PointId, SegmentId, SimTime, VehicleId};
use agv_engine::{Engine, EngineObserver, Vehicle};
use agv_output::{CsvTrajectoryWriter, TrajectoryObserver, TravelStats};
use agv_route::build_complete;

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const HORIZON_MINUTES: f64 = 1_000.0;
const SMOOTH_FACTOR:   f64 = 1.0;
const COLD_START:      f64 = 0.5;
const VEHICLE_SPEED:   f64 = 1.0; // distance units per minute

// ── Observer composition ──────────────────────────────────────────────────────

/// Feeds every engine event to both the CSV log and the stats accumulator.
struct DemoObserver {
    log:   TrajectoryObserver<CsvTrajectoryWriter<File>>,
    stats: TravelStats,
}

impl EngineObserver for DemoObserver {
    fn on_enter(&mut self, at: SimTime, v: VehicleId, p: PointId) {
        self.log.on_enter(at, v, p);
        self.stats.on_enter(at, v, p);
    }
    fn on_arrive(&mut self, at: SimTime, v: VehicleId, s: SegmentId) {
        self.log.on_arrive(at, v, s);
        self.stats.on_arrive(at, v, s);
    }
    fn on_complete(&mut self, at: SimTime, v: VehicleId, s: SegmentId) {
        self.log.on_complete(at, v, s);
        self.stats.on_complete(at, v, s);
    }
    fn on_depart(&mut self, at: SimTime, v: VehicleId, s: SegmentId) {
        self.log.on_depart(at, v, s);
        self.stats.on_depart(at, v, s);
    }
    fn on_ready_to_exit(&mut self, at: SimTime, v: VehicleId, p: PointId) {
        self.log.on_ready_to_exit(at, v, p);
        self.stats.on_ready_to_exit(at, v, p);
    }
    fn on_routing_miss(&mut self, at: SimTime, v: VehicleId, from: PointId, dest: PointId) {
        self.log.on_routing_miss(at, v, from, dest);
        self.stats.on_routing_miss(at, v, from, dest);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== diamond — agvsim demo ===");
    println!("Horizon: {HORIZON_MINUTES} min  |  smoothing: {SMOOTH_FACTOR}  |  cold start: {COLD_START}");
    println!();

    // 1. Network and routing table.
    let (net, [a, b, c, d, e, f]) = build_network();
    println!("Network: {} points, {} segments", net.point_count(), net.segment_count());
    let table = build_complete(&net);
    println!("Routing table: {} records", table.len());

    // 2. Observers.
    std::fs::create_dir_all("output/diamond")?;
    let writer = CsvTrajectoryWriter::from_path(Path::new("output/diamond/trajectories.csv"))?;
    let mut obs = DemoObserver {
        log:   TrajectoryObserver::new(writer),
        stats: TravelStats::new(&net),
    };

    // 3. Engine and vehicles.
    let config = EngineConfig {
        smooth_factor:    SMOOTH_FACTOR,
        cold_start_delay: COLD_START,
        ..Default::default()
    };
    let mut engine = Engine::new(net, table, config)?;

    let plans = [
        ("agv-1", a, vec![a, e, f]),
        ("agv-2", b, vec![b, c, f]),
        ("agv-3", d, vec![d, c, f]),
        ("agv-4", d, vec![d, c, f]),
        ("agv-5", e, vec![e, c, f]),
    ];
    let mut submitted = Vec::new();
    for (name, entry, targets) in plans {
        let vid = engine.request_to_enter(Vehicle::new(name, VEHICLE_SPEED, targets), entry, &mut obs)?;
        submitted.push((vid, name));
    }
    println!("Submitted {} vehicles", submitted.len());
    println!();

    // 4. Run.
    let t0 = Instant::now();
    let exited = engine.run_auto_exit(SimTime(HORIZON_MINUTES), &mut obs)?;
    let elapsed = t0.elapsed();

    let DemoObserver { mut log, stats } = obs;
    if let Some(err) = log.take_error() {
        eprintln!("output error: {err}");
    }
    log.finish()?;

    // 5. Summary.
    println!("Simulation complete in {:.3} s wall clock", elapsed.as_secs_f64());
    println!("Exited {} of {} vehicles by t+{HORIZON_MINUTES}", exited.len(), submitted.len());
    println!();
    println!("{:<8} {:>10} {:>10} {:>10}", "Vehicle", "Entered", "Ready", "Distance");
    println!("{}", "-".repeat(42));
    for (vid, name) in &submitted {
        if let Some(trip) = stats.trip(*vid) {
            println!(
                "{:<8} {:>10.2} {:>10.2} {:>10.1}",
                name,
                trip.entered.unwrap_or(f64::NAN),
                trip.ready.unwrap_or(f64::NAN),
                trip.distance,
            );
        }
    }
    println!();
    let summary = stats.summary();
    println!(
        "Completed trips: {}  |  mean travel time: {:.2} min  |  total distance: {:.1}",
        summary.completed, summary.mean_travel_time, summary.total_distance,
    );

    Ok(())
}
