//! Route query façade.
//!
//! [`RoutePlanner`] is the single entry point the presentation layer calls:
//! two geographic points in, a distance-optimal and a time-optimal route
//! out.  It owns the read-only graph and is `Send + Sync`; wrap it in an
//! `Arc` to serve concurrent queries.  It does no caching.

use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use rr_core::{GeoPoint, Projector, Puwg1992, RouterConfig, VertexId};
use rr_network::RoadGraph;

use crate::limits::SearchLimits;
use crate::route::Route;
use crate::search::{AStar, Dijkstra, PathAlgorithm};
use crate::{RoutingError, RoutingResult};

/// One route as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    /// `false` when the target is unreachable; every other field is then
    /// empty or zero.
    pub reachable: bool,
    pub vertices: Vec<VertexId>,
    pub coordinates: Vec<GeoPoint>,
    pub total_length_m: f64,
    pub total_time_s: f64,
    /// How long the search took, in milliseconds.
    pub search_ms: f64,
}

/// Both routes for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteComparison {
    pub source_vertex: VertexId,
    pub target_vertex: VertexId,
    /// Shortest by length (Dijkstra).
    pub distance_path: PathReport,
    /// Fastest by travel time (A*).
    pub time_path: PathReport,
}

/// Projection, snapping, and both path searches over one graph.
pub struct RoutePlanner<P: Projector = Puwg1992> {
    graph: RoadGraph,
    projector: P,
    config: RouterConfig,
}

impl RoutePlanner<Puwg1992> {
    /// Planner for graphs in the dataset's native CRS (EPSG:2180).
    pub fn new(graph: RoadGraph, config: RouterConfig) -> Self {
        Self::with_projector(graph, Puwg1992::new(), config)
    }
}

impl<P: Projector> RoutePlanner<P> {
    pub fn with_projector(graph: RoadGraph, projector: P, config: RouterConfig) -> Self {
        Self { graph, projector, config }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Project `point` and snap it to the nearest vertex within the
    /// configured radius.
    pub fn snap(&self, point: GeoPoint) -> RoutingResult<VertexId> {
        let planar = self.projector.to_projected(point)?;
        Ok(self.graph.nearest_vertex(planar, self.config.max_snap_distance)?)
    }

    /// Compare the shortest and the fastest route between two points given
    /// as `(lon, lat)` degrees.  Each search gets the configured deadline.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::Core`] with `InvalidCoordinate` for points outside
    ///   the projection domain.
    /// - [`RoutingError::Network`] with `NoVertexInRange` when a point has no
    ///   road nearby.
    /// - [`RoutingError::DegenerateQuery`] when both points snap to one
    ///   vertex.
    pub fn route(
        &self,
        source_lon: f64,
        source_lat: f64,
        target_lon: f64,
        target_lat: f64,
    ) -> RoutingResult<RouteComparison> {
        let limits = match self.config.search_deadline() {
            Some(timeout) => SearchLimits::with_timeout(timeout),
            None => SearchLimits::none(),
        };
        self.route_with_limits(
            GeoPoint::new(source_lon, source_lat),
            GeoPoint::new(target_lon, target_lat),
            &limits,
        )
    }

    /// Like [`route`](Self::route) with caller-supplied limits shared by
    /// both searches.
    pub fn route_with_limits(
        &self,
        source: GeoPoint,
        target: GeoPoint,
        limits: &SearchLimits,
    ) -> RoutingResult<RouteComparison> {
        let s = self.snap(source)?;
        let t = self.snap(target)?;
        debug!("route {source} -> {target}: snapped to {s} -> {t}");
        self.route_between(s, t, limits)
    }

    /// Both searches between two known vertices.
    pub fn route_between(
        &self,
        source: VertexId,
        target: VertexId,
        limits: &SearchLimits,
    ) -> RoutingResult<RouteComparison> {
        if source == target {
            return Err(RoutingError::DegenerateQuery(source));
        }

        let t0 = Instant::now();
        let by_length = Dijkstra.find_path(&self.graph, source, target, limits)?;
        let length_elapsed = t0.elapsed();

        let t0 = Instant::now();
        let by_time = AStar.find_path(&self.graph, source, target, limits)?;
        let time_elapsed = t0.elapsed();

        debug!(
            "route {source} -> {target}: shortest {:.1} m over {} vertices in {length_elapsed:.2?}, \
             fastest {:.1} s over {} vertices in {time_elapsed:.2?}",
            by_length.total_length_m,
            by_length.vertices.len(),
            by_time.total_time_s,
            by_time.vertices.len(),
        );

        Ok(RouteComparison {
            source_vertex: source,
            target_vertex: target,
            distance_path: self.report(&by_length, length_elapsed)?,
            time_path: self.report(&by_time, time_elapsed)?,
        })
    }

    /// Convert a route's vertices back to geographic coordinates, recording
    /// how long its search took.
    pub fn report(&self, route: &Route, search_time: Duration) -> RoutingResult<PathReport> {
        let coordinates = route
            .vertices
            .iter()
            .map(|&v| self.projector.to_geographic(self.graph.position(v)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PathReport {
            reachable: !route.is_empty(),
            vertices: route.vertices.clone(),
            coordinates,
            total_length_m: route.total_length_m,
            total_time_s: route.total_time_s,
            search_ms: search_time.as_secs_f64() * 1e3,
        })
    }
}
