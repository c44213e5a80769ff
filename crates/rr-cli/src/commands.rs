//! Subcommand bodies, kept apart from argument parsing so tests can drive
//! them directly.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use rr_core::{GeoPoint, RouterConfig};
use rr_network::{BuildStats, build_graph, load_segments_csv, load_snapshot, save_snapshot};
use rr_routing::{RouteComparison, RoutePlanner};

use crate::queries::QueryRow;

/// Load segments, build the graph, write the snapshot.
pub fn build(segments: &Path, out: &Path, config: &RouterConfig) -> Result<BuildStats> {
    let t0 = Instant::now();
    let records = load_segments_csv(segments)
        .with_context(|| format!("loading segments from {}", segments.display()))?;
    let (graph, stats) = build_graph(records, config).context("building graph")?;
    save_snapshot(&graph, out).with_context(|| format!("writing snapshot to {}", out.display()))?;
    info!(
        "snapshot {}: {} vertices, {} edges in {:.2?}",
        out.display(),
        stats.vertices,
        stats.edges,
        t0.elapsed()
    );
    Ok(stats)
}

pub fn open_planner(snapshot: &Path, config: RouterConfig) -> Result<RoutePlanner> {
    let graph = load_snapshot(snapshot)
        .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
    let planner = RoutePlanner::new(graph, config);
    info!(
        "planner ready: {} vertices, snap radius {} m, deadline {:?}",
        planner.graph().vertex_count(),
        planner.config().max_snap_distance,
        planner.config().search_deadline(),
    );
    Ok(planner)
}

pub fn route(planner: &RoutePlanner, from: GeoPoint, to: GeoPoint) -> Result<RouteComparison> {
    planner
        .route(from.lon, from.lat, to.lon, to.lat)
        .with_context(|| format!("routing {from} -> {to}"))
}

/// Outcome of one batch query.  Exactly one of `route` / `error` is set.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub query: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Route every query on the Rayon pool.  Results keep input order; a failed
/// query reports its error without affecting the others.
pub fn batch(planner: &RoutePlanner, rows: &[QueryRow]) -> Vec<BatchEntry> {
    let t0 = Instant::now();
    let entries: Vec<BatchEntry> = rows
        .par_iter()
        .enumerate()
        .map(|(query, row)| {
            let s = row.source();
            let t = row.target();
            match planner.route(s.lon, s.lat, t.lon, t.lat) {
                Ok(cmp) => BatchEntry { query, route: Some(cmp), error: None },
                Err(e) => BatchEntry { query, route: None, error: Some(e.to_string()) },
            }
        })
        .collect();
    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    info!("batch: {} queries, {failed} failed, {:.2?}", entries.len(), t0.elapsed());
    entries
}
