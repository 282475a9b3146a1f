//! CSV output backend.
//!
//! One file, one row per engine event:
//!
//! ```csv
//! time,vehicle,event,point,segment
//! 0.001,0,enter,0,4294967295
//! 0.001,0,arrive,65535,0
//! ```
//!
//! The sentinel columns keep the schema fixed across event kinds.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TrajectoryRow};

/// Writes trajectory rows to a single CSV file (or any `Write` sink).
pub struct CsvTrajectoryWriter<W: Write> {
    inner:    Writer<W>,
    finished: bool,
}

impl CsvTrajectoryWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvTrajectoryWriter<W> {
    /// Wrap any `Write` sink; useful for tests with an in-memory buffer.
    pub fn from_writer(sink: W) -> OutputResult<Self> {
        let mut inner = Writer::from_writer(sink);
        inner.write_record(["time", "vehicle", "event", "point", "segment"])?;
        Ok(Self { inner, finished: false })
    }

    /// Unwrap the inner sink (e.g. to inspect a test buffer).
    pub fn into_inner(self) -> OutputResult<W> {
        Ok(self.inner.into_inner().map_err(|e| e.into_error())?)
    }
}

impl<W: Write> OutputWriter for CsvTrajectoryWriter<W> {
    fn write_event(&mut self, row: &TrajectoryRow) -> OutputResult<()> {
        self.inner.write_record(&[
            row.time.to_string(),
            row.vehicle.to_string(),
            row.event.as_str().to_string(),
            row.point.to_string(),
            row.segment.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}
