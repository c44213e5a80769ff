//! Path algorithms: Dijkstra by length, A* by travel time.
//!
//! # Pluggability
//!
//! Both algorithms implement [`PathAlgorithm`], so the planner and tests can
//! run either through one interface.
//!
//! # Determinism
//!
//! Frontier entries carry a discovery sequence number.  Among entries with
//! equal priority the one pushed first pops first, so repeated queries on
//! the same graph always expand vertices in the same order and return the
//! same path.
//!
//! # A* heuristic
//!
//! `h(v) = |pos(v) − pos(target)| / S`, with `S` the graph's heuristic speed
//! (the fastest table speed unless the geometry demands more, see
//! [`RoadGraph::heuristic_speed_mps`]).  No arc can be traversed faster than
//! `S` in a straight line, so `h` is consistent: for every arc `u → v`,
//! `h(u) ≤ time(u, v) + h(v)`.  A vertex therefore never needs re-expanding
//! and the first time the target is popped its cost is optimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use rr_core::{ArcId, VertexId};
use rr_network::{NetworkError, RoadGraph};

use crate::limits::SearchLimits;
use crate::route::Route;
use crate::RoutingResult;

// ── PathAlgorithm trait ───────────────────────────────────────────────────────

/// A point-to-point path search over a [`RoadGraph`].
///
/// Implementations must be `Send + Sync`: one instance is shared by every
/// query thread.
pub trait PathAlgorithm: Send + Sync {
    /// Find a path from `from` to `to`.
    ///
    /// Returns an empty [`Route`] when `to` is unreachable or when
    /// `from == to`.  Fails only on unknown vertices or exceeded `limits`.
    fn find_path(
        &self,
        graph: &RoadGraph,
        from: VertexId,
        to: VertexId,
        limits: &SearchLimits,
    ) -> RoutingResult<Route>;
}

/// Minimum total length.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

/// Minimum total travel time.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl PathAlgorithm for Dijkstra {
    fn find_path(
        &self,
        graph: &RoadGraph,
        from: VertexId,
        to: VertexId,
        limits: &SearchLimits,
    ) -> RoutingResult<Route> {
        search(graph, from, to, limits, |g, a| g.arc_length_m(a), |_| 0.0)
    }
}

impl PathAlgorithm for AStar {
    fn find_path(
        &self,
        graph: &RoadGraph,
        from: VertexId,
        to: VertexId,
        limits: &SearchLimits,
    ) -> RoutingResult<Route> {
        if !graph.contains(to) {
            return Err(NetworkError::VertexNotFound(to).into());
        }
        let h = TimeHeuristic::new(graph, to);
        search(graph, from, to, limits, |g, a| g.arc_time_s(a), |v| h.estimate(v))
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Straight-line travel-time lower bound towards a fixed target.
pub struct TimeHeuristic<'g> {
    graph: &'g RoadGraph,
    target: VertexId,
    speed_mps: f64,
}

impl<'g> TimeHeuristic<'g> {
    pub fn new(graph: &'g RoadGraph, target: VertexId) -> Self {
        Self { graph, target, speed_mps: graph.heuristic_speed_mps() }
    }

    /// Lower bound, in seconds, on the travel time from `v` to the target.
    #[inline]
    pub fn estimate(&self, v: VertexId) -> f64 {
        if self.speed_mps.is_infinite() {
            return 0.0;
        }
        self.graph.position(v).distance(self.graph.position(self.target)) / self.speed_mps
    }
}

// ── Frontier ──────────────────────────────────────────────────────────────────

/// Heap entry.  `BinaryHeap` is a max-heap, so `Ord` is reversed: lowest
/// `key` first, then lowest `seq`.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    key:    f64,
    cost:   f64,
    seq:    u64,
    vertex: VertexId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Best-first search shared by both algorithms.  `weight` is the arc cost;
/// `h` is the heuristic (zero for Dijkstra).
fn search<W, H>(
    graph: &RoadGraph,
    from: VertexId,
    to: VertexId,
    limits: &SearchLimits,
    weight: W,
    h: H,
) -> RoutingResult<Route>
where
    W: Fn(&RoadGraph, ArcId) -> f64,
    H: Fn(VertexId) -> f64,
{
    for v in [from, to] {
        if !graph.contains(v) {
            return Err(NetworkError::VertexNotFound(v).into());
        }
    }
    if from == to {
        return Ok(Route::empty());
    }

    let n = graph.vertex_count();
    // best[v] = best known cost from `from` to v.
    let mut best = vec![f64::INFINITY; n];
    // prev_arc[v] = arc that reached v; ArcId::INVALID for unreached vertices.
    let mut prev_arc = vec![ArcId::INVALID; n];

    best[from.index()] = 0.0;

    let mut seq = 0u64;
    let mut heap = BinaryHeap::new();
    heap.push(Frontier { key: h(from), cost: 0.0, seq, vertex: from });

    let mut pops = 0u64;
    while let Some(Frontier { cost, vertex, .. }) = heap.pop() {
        limits.poll(pops)?;
        pops += 1;

        if vertex == to {
            trace!("search {from} -> {to}: settled after {pops} pops, cost {cost}");
            return Ok(reconstruct(graph, &prev_arc, from, to));
        }

        // Skip stale heap entries.
        if cost > best[vertex.index()] {
            continue;
        }

        for arc in graph.out_arcs(vertex) {
            let next = graph.arc_to[arc.index()];
            let new_cost = cost + weight(graph, arc);

            if new_cost < best[next.index()] {
                best[next.index()] = new_cost;
                prev_arc[next.index()] = arc;
                seq += 1;
                heap.push(Frontier { key: new_cost + h(next), cost: new_cost, seq, vertex: next });
            }
        }
    }

    trace!("search {from} -> {to}: frontier exhausted after {pops} pops");
    Ok(Route::empty())
}

fn reconstruct(graph: &RoadGraph, prev_arc: &[ArcId], from: VertexId, to: VertexId) -> Route {
    let mut arcs = Vec::new();
    let mut cur = to;
    while cur != from {
        let a = prev_arc[cur.index()];
        arcs.push(a);
        cur = graph.arc_from[a.index()];
    }
    arcs.reverse();
    Route::from_arcs(graph, from, arcs)
}
