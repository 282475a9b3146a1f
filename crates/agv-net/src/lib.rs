//! `agv-net` — the directed control-point network the engine runs on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`network`] | `ControlPoint`, `Network` (arena storage + pair index)   |
//! | [`segment`] | `Segment` — static geometry plus engine-mutated state    |
//! | [`loader`]  | `load_network_json` / `load_network_reader`              |
//! | [`error`]   | `NetError`, `NetResult<T>`                               |
//!
//! # Ownership
//!
//! Segments are owned by the [`Network`]; the movement engine mutates their
//! dynamic fields through `Network::segment_mut`.  Everything outside the
//! network holds [`PointId`]/[`SegmentId`](agv_core::SegmentId) handles, not
//! references.
//!
//! [`PointId`]: agv_core::PointId

pub mod error;
pub mod loader;
pub mod network;
pub mod segment;

#[cfg(test)]
mod tests;

pub use error::{NetError, NetResult};
pub use loader::{load_network_json, load_network_reader};
pub use network::{ControlPoint, Network};
pub use segment::Segment;
