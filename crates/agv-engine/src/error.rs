//! Engine error type.
//!
//! Capacity violations are fatal: they mean the admission bookkeeping has
//! already gone wrong, and continuing would let vehicles overlap.  Routing
//! misses are *not* errors — they are reported through
//! [`EngineObserver::on_routing_miss`](crate::EngineObserver::on_routing_miss)
//! and stall only the affected vehicle.

use thiserror::Error;

use agv_core::{CoreError, PointId, SegmentId, VehicleId};

/// Errors produced by `agv-engine`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("capacity underflow on {segment} during {event} of {vehicle}")]
    CapacityUnderflow {
        segment: SegmentId,
        vehicle: VehicleId,
        event:   &'static str,
    },

    #[error("capacity overflow on {segment} during {event} of {vehicle}")]
    CapacityOverflow {
        segment: SegmentId,
        vehicle: VehicleId,
        event:   &'static str,
    },

    #[error("no control point {0} in this network")]
    UnknownEntryPoint(PointId),

    #[error("no vehicle {0} registered with this engine")]
    UnknownVehicle(VehicleId),

    #[error("invalid vehicle: {0}")]
    InvalidVehicle(&'static str),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
