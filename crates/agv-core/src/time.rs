//! Simulation time model and planar coordinates.
//!
//! # Design
//!
//! The movement engine is event-driven: there is no fixed tick, and delays
//! (traversal time, smoothing gaps, chained re-schedules) are arbitrary
//! non-negative reals.  `SimTime` is therefore a thin wrapper over `f64`
//! rather than an integer counter.  The event queue in `agv-engine` is
//! responsible for giving these values a total order; `SimTime` itself only
//! promises plain IEEE comparison semantics.
//!
//! One time unit is whatever the caller makes of it — the demos treat it as
//! a minute.  Speeds are distance units per time unit.

use std::fmt;
use std::ops::{Add, Sub};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A point on the simulated clock.
///
/// Monotonicity is enforced by the event queue, not by this type.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// A stand-in for "before any event".  Segment admission stamps start
    /// here so the smoothing rule never delays the first vehicle in.
    pub const DISTANT_PAST: SimTime = SimTime(f64::NEG_INFINITY);

    /// Elapsed time units from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, delay: f64) -> SimTime {
        SimTime(self.0 + delay)
    }
}

impl Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{:.3}", self.0)
    }
}

// ── Coord ─────────────────────────────────────────────────────────────────────

/// A planar coordinate in whatever units the network document uses.
///
/// Only consumed by the routing builder, where Euclidean distance between
/// segment endpoints is the default edge weight.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
