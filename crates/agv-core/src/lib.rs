//! `agv-core` — foundational types for the `agvsim` workspace.
//!
//! This crate is a dependency of every other `agv-*` crate.  It intentionally
//! has no `agv-*` dependencies and only one external one (`thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`ids`]    | `PointId`, `SegmentId`, `VehicleId`               |
//! | [`time`]   | `SimTime`, `Coord`                                |
//! | [`config`] | `EngineConfig`                                    |
//! | [`error`]  | `CoreError`, `CoreResult`                         |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{PointId, SegmentId, VehicleId};
pub use time::{Coord, SimTime};
