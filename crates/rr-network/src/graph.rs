//! Road graph representation.
//!
//! # Data layout
//!
//! Undirected road links live in an **edge table** indexed by `EdgeId`
//! (`edges`).  Adjacency uses **Compressed Sparse Row (CSR)** format over
//! directed arcs: every edge contributes one arc in each direction, and the
//! outgoing arcs of `VertexId v` occupy the slice
//!
//! ```text
//! arc_to[ arc_start[v] .. arc_start[v+1] ]
//! ```
//!
//! Arc arrays (`arc_from`, `arc_to`, `arc_edge`) are sorted by source
//! vertex and indexed by `ArcId`.  Weights are read through `arc_edge`, so
//! both arcs of an edge carry identical length and time by construction.
//!
//! # Spatial index
//!
//! An R-tree ([`VertexIndex`]) over vertex positions, bulk-loaded when the
//! graph is assembled.  Used at query time to snap points to vertices.

use rr_core::{ArcId, EdgeId, MAX_SPEED_KMH, PlanarPoint, RoadClass, VertexId, kmh_to_mps};

use crate::spatial::VertexIndex;
use crate::{NetworkError, NetworkResult};

/// One undirected road link.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from:     VertexId,
    pub to:       VertexId,
    pub class:    RoadClass,
    /// Physical length in metres.
    pub length_m: f64,
    /// Travel time in seconds at the class speed.
    pub time_s:   f64,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Read-only road graph: vertex positions, edge table, CSR arcs, and a
/// spatial index.
///
/// Fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`GraphBuilder`](crate::GraphBuilder) or
/// [`snapshot::load_snapshot`](crate::snapshot::load_snapshot).
pub struct RoadGraph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Planar position of each vertex.  Indexed by `VertexId`.
    pub vertex_pos: Vec<PlanarPoint>,

    // ── Edge data ─────────────────────────────────────────────────────────
    /// Undirected edges.  Indexed by `EdgeId`.
    pub edges: Vec<Edge>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing arcs of vertex `v` are at ArcIds
    /// `arc_start[v] .. arc_start[v+1]`.  Length = `vertex_count + 1`.
    pub arc_start: Vec<u32>,

    /// Source vertex of each arc.  Redundant with CSR but required for
    /// path reconstruction (trace `prev_arc` back to the source).
    pub arc_from: Vec<VertexId>,

    /// Destination vertex of each arc.
    pub arc_to: Vec<VertexId>,

    /// Edge each arc was derived from.
    pub arc_edge: Vec<EdgeId>,

    // ── Derived ───────────────────────────────────────────────────────────
    heuristic_speed_mps: f64,
    spatial_idx: VertexIndex,
}

impl RoadGraph {
    /// Assemble the CSR arrays and spatial index from vertices and edges.
    ///
    /// Every edge endpoint must be a valid vertex and edges must not be
    /// self-loops.  Time complexity: O(E log E) for the arc sort plus
    /// O(N log N) for the R-tree bulk load.
    pub(crate) fn assemble(vertex_pos: Vec<PlanarPoint>, edges: Vec<Edge>) -> NetworkResult<Self> {
        let vertex_count = vertex_pos.len();
        if vertex_count == 0 || edges.is_empty() {
            return Err(NetworkError::EmptyGraph("no usable road segments"));
        }
        for e in &edges {
            for v in [e.from, e.to] {
                if v.index() >= vertex_count {
                    return Err(NetworkError::VertexNotFound(v));
                }
            }
        }

        // Two arcs per edge: (from, to, edge).
        let mut arcs: Vec<(VertexId, VertexId, EdgeId)> = Vec::with_capacity(edges.len() * 2);
        for (i, e) in edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            arcs.push((e.from, e.to, id));
            arcs.push((e.to, e.from, id));
        }
        // Stable sort keeps input order within a vertex's arc list.
        arcs.sort_by_key(|&(from, _, _)| from.0);

        let arc_from: Vec<VertexId> = arcs.iter().map(|a| a.0).collect();
        let arc_to:   Vec<VertexId> = arcs.iter().map(|a| a.1).collect();
        let arc_edge: Vec<EdgeId>   = arcs.iter().map(|a| a.2).collect();

        let mut arc_start = vec![0u32; vertex_count + 1];
        for &(from, _, _) in &arcs {
            arc_start[from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            arc_start[i] += arc_start[i - 1];
        }
        debug_assert_eq!(arc_start[vertex_count] as usize, arcs.len());

        let heuristic_speed_mps = heuristic_speed(&vertex_pos, &edges);
        let spatial_idx = VertexIndex::bulk_load(&vertex_pos);

        Ok(RoadGraph {
            vertex_pos,
            edges,
            arc_start,
            arc_from,
            arc_to,
            arc_edge,
            heuristic_speed_mps,
            spatial_idx,
        })
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_to.len()
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertex_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `ArcId`s of all outgoing arcs from `v`.
    ///
    /// This is a contiguous index range; no allocation.
    #[inline]
    pub fn out_arcs(&self, v: VertexId) -> impl Iterator<Item = ArcId> + '_ {
        let start = self.arc_start[v.index()] as usize;
        let end   = self.arc_start[v.index() + 1] as usize;
        (start..end).map(|i| ArcId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        (self.arc_start[v.index() + 1] - self.arc_start[v.index()]) as usize
    }

    #[inline]
    pub fn arc_length_m(&self, arc: ArcId) -> f64 {
        self.edges[self.arc_edge[arc.index()].index()].length_m
    }

    #[inline]
    pub fn arc_time_s(&self, arc: ArcId) -> f64 {
        self.edges[self.arc_edge[arc.index()].index()].time_s
    }

    #[inline]
    pub fn position(&self, v: VertexId) -> PlanarPoint {
        self.vertex_pos[v.index()]
    }

    // ── Heuristic support ─────────────────────────────────────────────────

    /// Speed ceiling (m/s) for the A* time heuristic.
    ///
    /// At least the fastest table speed.  Raised above it when some edge
    /// spans more straight-line distance than that speed covers in the
    /// edge's travel time (snapping can shift endpoints).  Infinite when
    /// such an edge takes zero time; the heuristic is then zero everywhere.
    pub fn heuristic_speed_mps(&self) -> f64 {
        self.heuristic_speed_mps
    }

    /// Vertex position divided by the heuristic speed.  Straight-line
    /// distance between two scaled positions is a lower bound on travel
    /// time.
    pub fn time_scaled_position(&self, v: VertexId) -> PlanarPoint {
        self.position(v).time_scaled(self.heuristic_speed_mps)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The vertex nearest to `pos`, strictly within `max_distance`.
    pub fn nearest_vertex(&self, pos: PlanarPoint, max_distance: f64) -> NetworkResult<VertexId> {
        self.spatial_idx.nearest(pos, max_distance)
    }

    /// Up to `k` nearest vertices to `pos`, sorted by ascending distance.
    pub fn k_nearest_vertices(&self, pos: PlanarPoint, k: usize) -> Vec<VertexId> {
        self.spatial_idx.k_nearest(pos, k)
    }
}

/// Largest straight-line speed any edge implies, floored at the table
/// maximum.
fn heuristic_speed(vertex_pos: &[PlanarPoint], edges: &[Edge]) -> f64 {
    let mut speed = kmh_to_mps(MAX_SPEED_KMH);
    for e in edges {
        let span = vertex_pos[e.from.index()].distance(vertex_pos[e.to.index()]);
        if span == 0.0 {
            continue;
        }
        if e.time_s <= 0.0 {
            return f64::INFINITY;
        }
        speed = speed.max(span / e.time_s);
    }
    speed
}
