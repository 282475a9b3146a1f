//! The `(from, destination) → next-hop` mapping.

use rustc_hash::FxHashMap;

use agv_core::PointId;

/// Immutable next-hop table.
///
/// Built offline (see [`builder`](crate::builder)) or loaded from disk
/// (see [`codec`](crate::codec)), then only read.  Destinations are
/// restricted to the network's entry/exit set by construction; a missing
/// key means "no route" and is the engine's problem to report.
#[derive(Default, Clone)]
pub struct RoutingTable {
    map: FxHashMap<(PointId, PointId), PointId>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Record the next hop from `from` toward `dest`.  Last write wins.
    pub fn insert(&mut self, from: PointId, dest: PointId, next: PointId) {
        self.map.insert((from, dest), next);
    }

    /// The immediate neighbor of `from` on the precomputed path to `dest`.
    #[inline]
    pub fn next_hop(&self, from: PointId, dest: PointId) -> Option<PointId> {
        self.map.get(&(from, dest)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `((from, dest), next)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((PointId, PointId), PointId)> + '_ {
        self.map.iter().map(|(&k, &v)| (k, v))
    }
}
