//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TrajectoryRow};

/// Sink for trajectory rows.
///
/// All methods return `OutputResult` so backends can surface I/O failures;
/// [`TrajectoryObserver`](crate::TrajectoryObserver) stores the first error
/// because observer hooks themselves cannot fail.
pub trait OutputWriter {
    /// Append one event row.
    fn write_event(&mut self, row: &TrajectoryRow) -> OutputResult<()>;

    /// Flush and close the underlying sink.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
