//! `rr-routing`: path search and the route query façade.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`search`]  | `PathAlgorithm` trait, `Dijkstra`, `AStar`, `TimeHeuristic`  |
//! | [`route`]   | `Route`                                                      |
//! | [`limits`]  | `SearchLimits`, `CancelToken`                                |
//! | [`planner`] | `RoutePlanner`, `RouteComparison`, `PathReport`              |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                           |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rr_network::load_snapshot;
//! use rr_routing::RoutePlanner;
//!
//! let graph = load_snapshot(Path::new("./snapshot"))?;
//! let planner = RoutePlanner::new(graph, RouterConfig::default());
//! let cmp = planner.route(19.93, 50.06, 19.95, 50.07)?;
//! println!("{:.0} m vs {:.0} s", cmp.distance_path.total_length_m, cmp.time_path.total_time_s);
//! ```

pub mod error;
pub mod limits;
pub mod planner;
pub mod route;
pub mod search;


pub use error::{RoutingError, RoutingResult};
pub use limits::{CancelToken, SearchLimits};
pub use planner::{PathReport, RouteComparison, RoutePlanner};
pub use route::Route;
pub use search::{AStar, Dijkstra, PathAlgorithm, TimeHeuristic};
