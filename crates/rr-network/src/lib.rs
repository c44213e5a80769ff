//! `rr-network`: road graph construction, spatial indexing, and snapshots.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`graph`]     | `RoadGraph` (edge table + CSR arcs + R-tree), `Edge`     |
//! | [`builder`]   | `GraphBuilder`, `RoadSegmentRecord`, `BuildStats`        |
//! | [`spatial`]   | `VertexIndex` (nearest-vertex snapping, merge lookups)   |
//! | [`loader`]    | `load_segments_csv`                                      |
//! | [`snapshot`]  | `save_snapshot`, `load_snapshot`                         |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Validates and weights segments on Rayon during a build.   |

pub mod builder;
pub mod error;
pub mod graph;
pub mod loader;
pub mod snapshot;
pub mod spatial;


pub use builder::{BuildStats, GraphBuilder, RoadSegmentRecord, build_graph};
pub use error::{NetworkError, NetworkResult};
pub use graph::{Edge, RoadGraph};
pub use loader::{load_segments_csv, load_segments_reader};
pub use snapshot::{EDGES_FILE, VERTICES_FILE, load_snapshot, save_snapshot};
pub use spatial::VertexIndex;
