//! `TrajectoryObserver<W>` — bridges `EngineObserver` to an `OutputWriter`.

use agv_core::{PointId, SegmentId, SimTime, VehicleId};
use agv_engine::EngineObserver;

use crate::row::{EventKind, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that records every engine event as a row in any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct TrajectoryObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the backend and unwrap it.
    pub fn finish(mut self) -> OutputResult<W> {
        self.writer.finish()?;
        Ok(self.writer)
    }

    fn record(&mut self, at: SimTime, vehicle: VehicleId, event: EventKind, point: Option<PointId>, segment: Option<SegmentId>) {
        let row = TrajectoryRow {
            time:    at.0,
            vehicle: vehicle.0,
            event,
            point:   point.map_or(u16::MAX, |p| p.0),
            segment: segment.map_or(u32::MAX, |s| s.0),
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EngineObserver for TrajectoryObserver<W> {
    fn on_enter(&mut self, at: SimTime, vehicle: VehicleId, point: PointId) {
        self.record(at, vehicle, EventKind::Enter, Some(point), None);
    }

    fn on_arrive(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        self.record(at, vehicle, EventKind::Arrive, None, Some(segment));
    }

    fn on_complete(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        self.record(at, vehicle, EventKind::Complete, None, Some(segment));
    }

    fn on_depart(&mut self, at: SimTime, vehicle: VehicleId, segment: SegmentId) {
        self.record(at, vehicle, EventKind::Depart, None, Some(segment));
    }

    fn on_ready_to_exit(&mut self, at: SimTime, vehicle: VehicleId, point: PointId) {
        self.record(at, vehicle, EventKind::ReadyToExit, Some(point), None);
    }

    fn on_routing_miss(&mut self, at: SimTime, vehicle: VehicleId, from: PointId, _dest: PointId) {
        self.record(at, vehicle, EventKind::RoutingMiss, Some(from), None);
    }
}
