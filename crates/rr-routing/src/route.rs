//! Path search results.

use rr_core::{ArcId, VertexId};
use rr_network::RoadGraph;

/// The result of one path search: vertices from source to target, the arcs
/// between them, and totals accumulated along exactly that sequence.
///
/// An empty route means "no path": the target is unreachable, or source and
/// target were the same vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub vertices: Vec<VertexId>,
    /// `arcs[i]` leads from `vertices[i]` to `vertices[i + 1]`.
    pub arcs: Vec<ArcId>,
    pub total_length_m: f64,
    pub total_time_s: f64,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a route from the arcs of a path, summing both weights.
    pub(crate) fn from_arcs(graph: &RoadGraph, source: VertexId, arcs: Vec<ArcId>) -> Self {
        let mut vertices = Vec::with_capacity(arcs.len() + 1);
        vertices.push(source);
        let mut total_length_m = 0.0;
        let mut total_time_s = 0.0;
        for &a in &arcs {
            vertices.push(graph.arc_to[a.index()]);
            total_length_m += graph.arc_length_m(a);
            total_time_s += graph.arc_time_s(a);
        }
        Route { vertices, arcs, total_length_m, total_time_s }
    }

    /// `true` when no path was found.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
