//! Network-subsystem error type.

use thiserror::Error;

use agv_core::PointId;

/// Errors produced by `agv-net`.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("no segment from {from} to {to}")]
    NoSuchSegment { from: PointId, to: PointId },

    #[error("unknown control point {0:?}")]
    UnknownPoint(String),

    #[error("duplicate control point {0:?}")]
    DuplicatePoint(String),

    #[error("network has {0} points; point ids are 16-bit")]
    TooManyPoints(usize),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetResult<T> = Result<T, NetError>;
