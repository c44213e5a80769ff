//! Graph construction from raw road-segment records.
//!
//! # Pipeline
//!
//! 1. **Validate** each record: both endpoints present and finite, start and
//!    end not identical, length finite and non-negative.  Anything else is
//!    skipped and counted, never fatal.
//! 2. **Weight** it: `time_s = length / (speed_kmh(class) / 3.6)`.
//! 3. **Merge** endpoints into vertices.  An endpoint reuses the first
//!    committed vertex (lowest id) within the merge tolerance, otherwise a
//!    new vertex is allocated.  Start is resolved before end.
//! 4. **Emit** one undirected edge, unless both endpoints collapsed onto
//!    the same vertex, in which case the edge is dropped.
//!
//! Steps 1–2 are pure per record and run on Rayon with the `parallel`
//! feature.  Step 3 is inherently sequential: ids depend on input order.
//!
//! # Merge strategies
//!
//! | Strategy  | Cost per endpoint | Notes                              |
//! |-----------|-------------------|------------------------------------|
//! | `Linear`  | O(V)              | reference behaviour, O(V²) total   |
//! | `Indexed` | O(log V)          | R-tree, identical output           |

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use rr_core::{MergeStrategy, PlanarPoint, RoadClass, RouterConfig, VertexId};

use crate::graph::{Edge, RoadGraph};
use crate::spatial::VertexIndex;
use crate::{NetworkError, NetworkResult};

// ── Input record ──────────────────────────────────────────────────────────────

/// One road segment as handed over by the geometry source.  Only the
/// first and last points of the segment's polyline matter; `length` is the
/// full polyline length.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSegmentRecord {
    pub start:  Option<PlanarPoint>,
    pub end:    Option<PlanarPoint>,
    pub length: f64,
    pub class:  String,
}

impl RoadSegmentRecord {
    pub fn new(start: PlanarPoint, end: PlanarPoint, length: f64, class: impl Into<String>) -> Self {
        Self { start: Some(start), end: Some(end), length, class: class.into() }
    }
}

/// A record that passed validation, with its travel time computed.
#[derive(Clone, Debug)]
struct PreparedSegment {
    start:  PlanarPoint,
    end:    PlanarPoint,
    length: f64,
    time:   f64,
    class:  RoadClass,
}

/// Why a record was not turned into a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Rejection {
    MissingEndpoint,
    NonFinite,
    IdenticalEndpoints,
    BadLength,
}

fn prepare(rec: RoadSegmentRecord) -> Result<PreparedSegment, Rejection> {
    let (start, end) = match (rec.start, rec.end) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(Rejection::MissingEndpoint),
    };
    if !start.is_finite() || !end.is_finite() {
        return Err(Rejection::NonFinite);
    }
    if start == end {
        return Err(Rejection::IdenticalEndpoints);
    }
    if !rec.length.is_finite() || rec.length < 0.0 {
        return Err(Rejection::BadLength);
    }
    let class = RoadClass::from_label(&rec.class);
    let time = class.travel_time_s(rec.length);
    Ok(PreparedSegment { start, end, length: rec.length, time, class })
}

// ── Build statistics ──────────────────────────────────────────────────────────

/// Counters and phase timings reported after a build.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub records_read:       usize,
    /// Missing, non-finite, or identical endpoints; bad length.
    pub skipped_degenerate: usize,
    /// Both endpoints merged onto one vertex; edge dropped.
    pub collapsed:          usize,
    pub vertices:           usize,
    pub edges:              usize,
    /// Wall time spent matching endpoints to vertices, in milliseconds.
    pub merge_ms:           f64,
    /// Wall time from builder creation to the assembled graph.
    pub total_ms:           f64,
}

// ── Vertex merging ────────────────────────────────────────────────────────────

/// Committed vertex positions plus, for the indexed strategy, an R-tree
/// kept in step with them.
struct VertexMerger {
    tolerance: f64,
    positions: Vec<PlanarPoint>,
    index:     Option<VertexIndex>,
}

impl VertexMerger {
    fn new(tolerance: f64, strategy: MergeStrategy) -> Self {
        let index = match strategy {
            MergeStrategy::Linear  => None,
            MergeStrategy::Indexed => Some(VertexIndex::new()),
        };
        Self { tolerance, positions: Vec::new(), index }
    }

    /// Return the vertex for `p`, allocating one if none is within
    /// tolerance.
    fn find_or_create(&mut self, p: PlanarPoint) -> VertexId {
        let existing = match &self.index {
            Some(index) => index.first_within(p, self.tolerance),
            None => {
                let tol_2 = self.tolerance * self.tolerance;
                self.positions
                    .iter()
                    .position(|q| q.distance_2(p) <= tol_2)
                    .map(|i| VertexId(i as u32))
            }
        };
        if let Some(id) = existing {
            return id;
        }

        let id = VertexId(self.positions.len() as u32);
        self.positions.push(p);
        if let Some(index) = &mut self.index {
            index.insert(id, p);
        }
        id
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] from segment records, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rr_core::PlanarPoint;
/// use rr_network::{GraphBuilder, RoadSegmentRecord};
///
/// let mut b = GraphBuilder::new();
/// b.add_segment(RoadSegmentRecord::new(
///     PlanarPoint::new(0.0, 0.0),
///     PlanarPoint::new(100.0, 0.0),
///     100.0,
///     "L",
/// ));
/// let (graph, stats) = b.build().unwrap();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.arc_count(), 2); // bidirectional
/// assert_eq!(stats.edges, 1);
/// ```
pub struct GraphBuilder {
    merger:     VertexMerger,
    edges:      Vec<Edge>,
    stats:      BuildStats,
    started:    Instant,
    merge_time: Duration,
}

impl GraphBuilder {
    /// Builder with the default tolerance (0.5) and linear merging.
    pub fn new() -> Self {
        Self::from_config(&RouterConfig::default())
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::with_options(config.merge_tolerance, config.merge_strategy)
    }

    pub fn with_options(tolerance: f64, strategy: MergeStrategy) -> Self {
        Self {
            merger:     VertexMerger::new(tolerance, strategy),
            edges:      Vec::new(),
            stats:      BuildStats::default(),
            started:    Instant::now(),
            merge_time: Duration::ZERO,
        }
    }

    /// Validate, weight, and merge one record.
    pub fn add_segment(&mut self, rec: RoadSegmentRecord) {
        self.stats.records_read += 1;
        match prepare(rec) {
            Ok(seg) => self.commit(seg),
            Err(why) => self.reject(why),
        }
    }

    /// Add every record in order.  With the `parallel` feature, validation
    /// and weighting fan out over Rayon first; merging stays in input order.
    pub fn add_segments(&mut self, records: Vec<RoadSegmentRecord>) {
        self.stats.records_read += records.len();

        #[cfg(feature = "parallel")]
        let prepared: Vec<Result<PreparedSegment, Rejection>> = {
            use rayon::prelude::*;
            records.into_par_iter().map(prepare).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let prepared: Vec<Result<PreparedSegment, Rejection>> =
            records.into_iter().map(prepare).collect();

        for p in prepared {
            match p {
                Ok(seg) => self.commit(seg),
                Err(why) => self.reject(why),
            }
        }
    }

    fn reject(&mut self, why: Rejection) {
        self.stats.skipped_degenerate += 1;
        debug!("skipping road segment: {why:?}");
    }

    fn commit(&mut self, seg: PreparedSegment) {
        let t0 = Instant::now();
        let from = self.merger.find_or_create(seg.start);
        let to   = self.merger.find_or_create(seg.end);
        self.merge_time += t0.elapsed();
        if from == to {
            self.stats.collapsed += 1;
            debug!("dropping segment collapsed onto {from}");
            return;
        }
        self.edges.push(Edge {
            from,
            to,
            class:    seg.class,
            length_m: seg.length,
            time_s:   seg.time,
        });
    }

    pub fn vertex_count(&self) -> usize { self.merger.positions.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`RoadGraph`] plus build counters.
    ///
    /// # Errors
    ///
    /// [`NetworkError::EmptyGraph`] if no record produced an edge.
    pub fn build(self) -> NetworkResult<(RoadGraph, BuildStats)> {
        let mut stats = self.stats;
        if self.edges.is_empty() {
            return Err(NetworkError::EmptyGraph(if stats.records_read == 0 {
                "input dataset is empty"
            } else {
                "every road segment was degenerate"
            }));
        }
        if stats.skipped_degenerate > 0 {
            warn!("skipped {} degenerate road segments", stats.skipped_degenerate);
        }
        stats.vertices = self.merger.positions.len();
        stats.edges = self.edges.len();

        let graph = RoadGraph::assemble(self.merger.positions, self.edges)?;
        stats.merge_ms = self.merge_time.as_secs_f64() * 1e3;
        stats.total_ms = self.started.elapsed().as_secs_f64() * 1e3;
        info!(
            "built road graph: {} vertices, {} edges from {} records ({} skipped, {} collapsed) \
             in {:.1} ms ({:.1} ms merging)",
            stats.vertices, stats.edges, stats.records_read, stats.skipped_degenerate, stats.collapsed,
            stats.total_ms, stats.merge_ms,
        );
        Ok((graph, stats))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a graph from a complete batch of records using `config`'s merge
/// settings.
pub fn build_graph(
    records: Vec<RoadSegmentRecord>,
    config: &RouterConfig,
) -> NetworkResult<(RoadGraph, BuildStats)> {
    let mut builder = GraphBuilder::from_config(config);
    builder.add_segments(records);
    builder.build()
}
