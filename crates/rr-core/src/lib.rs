//! `rr-core`: foundational types for the road router.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and minimal external ones (`thiserror`, `serde`,
//! `serde_json`).
//!
//! # What lives here
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`ids`]          | `VertexId`, `EdgeId`, `ArcId`                        |
//! | [`geo`]          | `GeoPoint`, `PlanarPoint`                            |
//! | [`projection`]   | `Projector` trait, `TransverseMercator`, `Puwg1992`  |
//! | [`road_class`]   | `RoadClass`, fixed speed table                       |
//! | [`config`]       | `RouterConfig`, `MergeStrategy`                      |
//! | [`error`]        | `CoreError`, `CoreResult`                            |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod projection;
pub mod road_class;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MergeStrategy, RouterConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, PlanarPoint};
pub use ids::{ArcId, EdgeId, VertexId};
pub use projection::{Projector, Puwg1992, TransverseMercator};
pub use road_class::{DEFAULT_SPEED_KMH, MAX_SPEED_KMH, RoadClass, kmh_to_mps};
