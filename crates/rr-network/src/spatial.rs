//! Spatial index over graph vertices.
//!
//! An R-tree (via `rstar`) over planar `[x, y]` points, each tagged with its
//! `VertexId`.  Two queries matter:
//!
//! - **Snapping** ([`VertexIndex::nearest`]): the closest vertex strictly
//!   within a search radius, ties broken by lowest id.
//! - **Merging** ([`VertexIndex::first_within`]): the lowest-id vertex within
//!   an inclusive tolerance.  Lowest id reproduces what a linear scan in id
//!   order would return, so the indexed builder matches the linear one.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rr_core::{PlanarPoint, VertexId};

use crate::{NetworkError, NetworkResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct VertexEntry {
    point: [f64; 2], // [x, y]
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in projected units.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── VertexIndex ───────────────────────────────────────────────────────────────

/// Nearest-vertex finder.  Built once alongside the graph and read-only
/// afterwards, except while the builder grows it during indexed merging.
pub struct VertexIndex {
    tree: RTree<VertexEntry>,
}

impl VertexIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load from vertex positions indexed by `VertexId`.
    ///
    /// O(N log N); faster than N inserts.
    pub fn bulk_load(positions: &[PlanarPoint]) -> Self {
        let entries: Vec<VertexEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| VertexEntry {
                point: [p.x, p.y],
                id: VertexId(i as u32),
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn insert(&mut self, id: VertexId, pos: PlanarPoint) {
        self.tree.insert(VertexEntry { point: [pos.x, pos.y], id });
    }

    /// The vertex closest to `pos` among those strictly closer than
    /// `max_distance`.  Equidistant candidates resolve to the lowest id.
    ///
    /// # Errors
    ///
    /// [`NetworkError::NoVertexInRange`] if no vertex qualifies, including
    /// when `max_distance` is zero, negative, or NaN.
    pub fn nearest(&self, pos: PlanarPoint, max_distance: f64) -> NetworkResult<VertexId> {
        let no_vertex = || NetworkError::NoVertexInRange { point: pos, max_distance };

        if max_distance.is_nan() || max_distance <= 0.0 || !pos.is_finite() {
            return Err(no_vertex());
        }
        let max_2 = max_distance * max_distance;

        self.tree
            .locate_within_distance([pos.x, pos.y], max_2)
            .map(|e| (e.distance_2(&[pos.x, pos.y]), e.id))
            .filter(|&(d2, _)| d2 < max_2)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
            .ok_or_else(no_vertex)
    }

    /// The lowest-id vertex within `tolerance` (inclusive) of `pos`.
    pub fn first_within(&self, pos: PlanarPoint, tolerance: f64) -> Option<VertexId> {
        self.tree
            .locate_within_distance([pos.x, pos.y], tolerance * tolerance)
            .map(|e| e.id)
            .min()
    }

    /// Up to `k` vertices ordered by ascending distance from `pos`.
    pub fn k_nearest(&self, pos: PlanarPoint, k: usize) -> Vec<VertexId> {
        self.tree
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

impl Default for VertexIndex {
    fn default() -> Self {
        Self::new()
    }
}
