//! CSV snapshot of a built graph.
//!
//! Creates two files in the snapshot directory:
//!
//! - `vertices.csv`: `vertex_id,x,y,x_astar,y_astar`
//! - `edges.csv`:    `edge_id,from_vertex,to_vertex,road_class,length_m,time_s`
//!
//! `x_astar`/`y_astar` are the time-scaled positions (coordinates divided by
//! the heuristic speed).  They are written for consumers that run A* on
//! scaled coordinates and ignored on load, where they are re-derived.
//!
//! Loading reconstructs the graph without re-running the builder: weights
//! are taken as stored, not recomputed from the speed table.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use rr_core::{EdgeId, PlanarPoint, RoadClass, VertexId};

use crate::graph::{Edge, RoadGraph};
use crate::{NetworkError, NetworkResult};

pub const VERTICES_FILE: &str = "vertices.csv";
pub const EDGES_FILE: &str = "edges.csv";

// ── Rows ──────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct VertexRow {
    vertex_id: VertexId,
    x:         f64,
    y:         f64,
    #[serde(default)]
    x_astar:   Option<f64>,
    #[serde(default)]
    y_astar:   Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct EdgeRow {
    edge_id:     EdgeId,
    from_vertex: VertexId,
    to_vertex:   VertexId,
    road_class:  RoadClass,
    length_m:    f64,
    time_s:      f64,
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `graph` to `dir`, creating the directory if needed.
pub fn save_snapshot(graph: &RoadGraph, dir: &Path) -> NetworkResult<()> {
    std::fs::create_dir_all(dir)?;
    let vertices = File::create(dir.join(VERTICES_FILE))?;
    let edges = File::create(dir.join(EDGES_FILE))?;
    write_snapshot(graph, vertices, edges)?;
    info!(
        "wrote snapshot to {}: {} vertices, {} edges",
        dir.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(())
}

/// Like [`save_snapshot`] but writes to arbitrary sinks.
pub fn write_snapshot<V: Write, E: Write>(graph: &RoadGraph, vertices: V, edges: E) -> NetworkResult<()> {
    let mut w = csv::Writer::from_writer(vertices);
    for (i, &pos) in graph.vertex_pos.iter().enumerate() {
        let id = VertexId(i as u32);
        let scaled = graph.time_scaled_position(id);
        w.serialize(VertexRow {
            vertex_id: id,
            x:         pos.x,
            y:         pos.y,
            x_astar:   Some(scaled.x),
            y_astar:   Some(scaled.y),
        })?;
    }
    w.flush()?;

    let mut w = csv::Writer::from_writer(edges);
    for (i, e) in graph.edges.iter().enumerate() {
        w.serialize(EdgeRow {
            edge_id:     EdgeId(i as u32),
            from_vertex: e.from,
            to_vertex:   e.to,
            road_class:  e.class.clone(),
            length_m:    e.length_m,
            time_s:      e.time_s,
        })?;
    }
    w.flush()?;
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read a graph previously written by [`save_snapshot`].
pub fn load_snapshot(dir: &Path) -> NetworkResult<RoadGraph> {
    let vertices = File::open(dir.join(VERTICES_FILE))?;
    let edges = File::open(dir.join(EDGES_FILE))?;
    let graph = read_snapshot(vertices, edges)?;
    info!(
        "loaded snapshot from {}: {} vertices, {} edges",
        dir.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Like [`load_snapshot`] but reads from arbitrary sources.
///
/// # Errors
///
/// [`NetworkError::InvalidSnapshot`] if ids are not dense `0..n`, a vertex
/// position is not finite, or an edge has a bad endpoint or weight.
pub fn read_snapshot<V: Read, E: Read>(vertices: V, edges: E) -> NetworkResult<RoadGraph> {
    let mut rows: Vec<VertexRow> = csv::Reader::from_reader(vertices)
        .deserialize()
        .collect::<Result<_, _>>()?;
    rows.sort_unstable_by_key(|r| r.vertex_id);
    for (i, r) in rows.iter().enumerate() {
        if r.vertex_id.index() != i {
            return Err(NetworkError::InvalidSnapshot(format!(
                "vertex ids must be dense from 0; expected {i}, found {}",
                r.vertex_id.0
            )));
        }
        if !r.x.is_finite() || !r.y.is_finite() {
            return Err(NetworkError::InvalidSnapshot(format!(
                "vertex {i} has a non-finite position"
            )));
        }
    }
    let vertex_pos: Vec<PlanarPoint> = rows.iter().map(|r| PlanarPoint::new(r.x, r.y)).collect();

    let mut rows: Vec<EdgeRow> = csv::Reader::from_reader(edges)
        .deserialize()
        .collect::<Result<_, _>>()?;
    rows.sort_unstable_by_key(|r| r.edge_id);

    let mut edge_list = Vec::with_capacity(rows.len());
    for (i, r) in rows.into_iter().enumerate() {
        if r.edge_id.index() != i {
            return Err(NetworkError::InvalidSnapshot(format!(
                "edge ids must be dense from 0; expected {i}, found {}",
                r.edge_id.0
            )));
        }
        for v in [r.from_vertex, r.to_vertex] {
            if v.index() >= vertex_pos.len() {
                return Err(NetworkError::InvalidSnapshot(format!(
                    "edge {} references missing vertex {}",
                    r.edge_id.0, v.0
                )));
            }
        }
        if r.from_vertex == r.to_vertex {
            return Err(NetworkError::InvalidSnapshot(format!("edge {} is a self-loop", r.edge_id.0)));
        }
        let weight_ok = |w: f64| w.is_finite() && w >= 0.0;
        if !weight_ok(r.length_m) || !weight_ok(r.time_s) {
            return Err(NetworkError::InvalidSnapshot(format!(
                "edge {} has a negative or non-finite weight",
                r.edge_id.0
            )));
        }
        edge_list.push(Edge {
            from:     r.from_vertex,
            to:       r.to_vertex,
            class:    r.road_class,
            length_m: r.length_m,
            time_s:   r.time_s,
        });
    }

    RoadGraph::assemble(vertex_pos, edge_list)
}
