//! `agv-output` — trajectory logging and travel metrics.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`row`]      | `TrajectoryRow`, `EventKind` — plain row data          |
//! | [`writer`]   | The `OutputWriter` trait                               |
//! | [`csv`]      | `CsvTrajectoryWriter` backend                          |
//! | [`observer`] | `TrajectoryObserver<W>` — engine hooks → writer        |
//! | [`stats`]    | `TravelStats` — per-vehicle trip accumulators          |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                       |

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;


pub use csv::CsvTrajectoryWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrajectoryObserver;
pub use row::{EventKind, TrajectoryRow};
pub use stats::{StatsSummary, TravelStats, TripStats};
pub use writer::OutputWriter;
