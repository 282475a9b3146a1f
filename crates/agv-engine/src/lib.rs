//! `agv-engine` — the discrete-event movement engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`engine`]   | `Engine`, `ReadyVehicle` — the state machine            |
//! | [`vehicle`]  | `Vehicle`, `NextSegment`                                |
//! | [`observer`] | `EngineObserver`, `NoopObserver`, `MultiObserver`       |
//! | `sched`      | event queue internals (crate-private)                   |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                        |
//!
//! # Driving the engine
//!
//! ```rust,ignore
//! let mut engine = Engine::new(network, table, EngineConfig::default())?;
//! engine.request_to_enter(vehicle, entry_point, &mut obs)?;
//! let exited = engine.run_auto_exit(SimTime(1_000.0), &mut obs)?;
//! ```
//!
//! Hosts that control unloading themselves use `run_until` + `ready()` +
//! `exit` instead of `run_auto_exit`.

pub mod engine;
pub mod error;
pub mod observer;
pub mod vehicle;

mod sched;


pub use engine::{Engine, ReadyVehicle};
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, MultiObserver, NoopObserver};
pub use vehicle::{NextSegment, Vehicle};
