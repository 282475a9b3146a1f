//! Routing-subsystem error type.

use thiserror::Error;

/// Errors produced by `agv-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("routing table truncated: expected {expected} records, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("routing table has bytes after the last record")]
    TrailingBytes,

    #[error("network has fewer than two entry/exit points")]
    NoEntryExitPoints,
}

pub type RouteResult<T> = Result<T, RouteError>;
