//! Offline routing-table construction.
//!
//! # Complete mode
//!
//! One **reverse** single-source shortest-path run per destination: the
//! forward edge set is reversed once, then a best-first search expands out
//! of each destination, and every settled node records the neighbor it was
//! relaxed through — which is exactly its forward next hop toward that
//! destination.  Edge weight is the Euclidean distance between the two
//! endpoints' coordinates.
//!
//! Cost is `O(D · (V + E) · log V)` for `D` destinations; the runs are
//! independent, so they fan out across Rayon workers and merge into one
//! table (each destination owns a disjoint key range, so merge order is
//! irrelevant).
//!
//! # Sampled mode
//!
//! `num_routes` random (origin, destination) pairs from the entry/exit set,
//! drawn with a seeded RNG, each solved by forward A* with the Euclidean
//! metric as the admissible heuristic.  Every node on a resulting path
//! contributes one `(node, destination) → next` entry.
//!
//! # Determinism
//!
//! Ties are broken toward the smaller point id (both in the heap key and
//! when an equal-cost relaxation is seen), so the same network and seed
//! always produce the same mapping — and, through the sorted codec, the
//! same bytes on disk.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use agv_core::PointId;
use agv_net::Network;

use crate::table::RoutingTable;
use crate::{RouteError, RouteResult};

// ── Complete mode ─────────────────────────────────────────────────────────────

/// Build the all-destinations table: one reverse SSSP per entry/exit point.
///
/// A destination unreachable from some node simply yields no entry for that
/// pair; the engine treats the missing key as "no route" at query time.
pub fn build_complete(network: &Network) -> RoutingTable {
    let dests = network.entry_exit_points();
    let rev = reverse_adjacency(network);

    let per_dest: Vec<Vec<(PointId, PointId)>> = dests
        .par_iter()
        .map(|&dest| reverse_sssp(network, &rev, dest))
        .collect();

    let mut table = RoutingTable::with_capacity(per_dest.iter().map(Vec::len).sum());
    for (&dest, hops) in dests.iter().zip(per_dest) {
        for (from, next) in hops {
            table.insert(from, dest, next);
        }
    }
    table
}

/// Predecessor lists under the forward edge set: entry `m` holds every
/// `(n, weight(n → m))`.
fn reverse_adjacency(network: &Network) -> Vec<Vec<(PointId, f64)>> {
    let mut rev: Vec<Vec<(PointId, f64)>> = vec![Vec::new(); network.point_count()];
    for (_, seg) in network.segments() {
        let w = network.pos(seg.start).distance(network.pos(seg.end));
        rev[seg.end.index()].push((seg.start, w));
    }
    rev
}

/// Best-first search on the reversed graph from `dest`.
///
/// Returns `(from, next_hop)` for every node that can reach `dest`.
fn reverse_sssp(
    network: &Network,
    rev: &[Vec<(PointId, f64)>],
    dest: PointId,
) -> Vec<(PointId, PointId)> {
    let n = network.point_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut next = vec![PointId::INVALID; n];

    // Min-heap via Reverse; secondary PointId key keeps pops deterministic.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, PointId)>> = BinaryHeap::new();
    dist[dest.index()] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), dest)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost.0 > dist[node.index()] {
            continue;
        }
        for &(pred, w) in &rev[node.index()] {
            let relaxed = cost.0 + w;
            if relaxed < dist[pred.index()] {
                dist[pred.index()] = relaxed;
                next[pred.index()] = node;
                heap.push(Reverse((OrderedFloat(relaxed), pred)));
            } else if relaxed == dist[pred.index()] && node < next[pred.index()] {
                // Equal-cost alternative: keep the ascending-id hop.
                next[pred.index()] = node;
            }
        }
    }

    (0..n)
        .filter(|&i| i != dest.index() && next[i] != PointId::INVALID)
        .map(|i| (PointId(i as u16), next[i]))
        .collect()
}

// ── Sampled mode ──────────────────────────────────────────────────────────────

/// Build a partial table from `num_routes` seeded random entry/exit pairs.
pub fn build_sampled(network: &Network, num_routes: usize, seed: u64) -> RouteResult<RoutingTable> {
    let endpoints = network.entry_exit_points();
    if endpoints.len() < 2 {
        return Err(RouteError::NoEntryExitPoints);
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut table = RoutingTable::new();

    for _ in 0..num_routes {
        // Draw two distinct indices without rejection sampling.
        let i = rng.gen_range(0..endpoints.len());
        let mut j = rng.gen_range(0..endpoints.len() - 1);
        if j >= i {
            j += 1;
        }
        let (from, to) = (endpoints[i], endpoints[j]);

        if let Some(path) = astar_path(network, from, to) {
            for hop in path.windows(2) {
                table.insert(hop[0], to, hop[1]);
            }
        }
    }
    Ok(table)
}

/// Forward A* over the out-adjacency; heuristic is straight-line distance
/// to `to`, which never overestimates a Euclidean-weighted path.
fn astar_path(network: &Network, from: PointId, to: PointId) -> Option<Vec<PointId>> {
    if from == to {
        return Some(vec![from]);
    }

    let n = network.point_count();
    let goal = network.pos(to);
    let mut g = vec![f64::INFINITY; n];
    let mut prev = vec![PointId::INVALID; n];

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, PointId)>> = BinaryHeap::new();
    g[from.index()] = 0.0;
    heap.push(Reverse((OrderedFloat(network.pos(from).distance(goal)), from)));

    while let Some(Reverse((f, node))) = heap.pop() {
        if node == to {
            break;
        }
        let here = network.pos(node);
        if f.0 > g[node.index()] + here.distance(goal) {
            continue;
        }
        for &sid in network.out_segments(node) {
            let succ = network.segment(sid).end;
            let relaxed = g[node.index()] + here.distance(network.pos(succ));
            if relaxed < g[succ.index()] {
                g[succ.index()] = relaxed;
                prev[succ.index()] = node;
                let estimate = relaxed + network.pos(succ).distance(goal);
                heap.push(Reverse((OrderedFloat(estimate), succ)));
            } else if relaxed == g[succ.index()] && node < prev[succ.index()] {
                prev[succ.index()] = node;
            }
        }
    }

    if prev[to.index()] == PointId::INVALID {
        return None;
    }
    let mut path = vec![to];
    let mut cursor = to;
    while cursor != from {
        cursor = prev[cursor.index()];
        path.push(cursor);
    }
    path.reverse();
    Some(path)
}
