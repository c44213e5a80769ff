//! Geographic and planar coordinate types.
//!
//! `GeoPoint` and `PlanarPoint` use `f64`.  Planar coordinates are metres in
//! the dataset's projected CRS, and sub-metre precision matters both for the
//! 0.5 m endpoint merge tolerance and for projection round-trips.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees (GRS80 / WGS84 datum).
///
/// Field order follows the `(lon, lat)` axis order used throughout the
/// crate, matching `x, y` in the projected system.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// A point in the projected (planar) coordinate system.  `x` is easting,
/// `y` is northing, both in metres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Prefer this for comparisons.
    #[inline]
    pub fn distance_2(self, other: PlanarPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in projected units (metres).
    #[inline]
    pub fn distance(self, other: PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Coordinates divided by `speed_mps`.  Euclidean distance between two
    /// scaled points is the straight-line travel time at that speed.
    #[inline]
    pub fn time_scaled(self, speed_mps: f64) -> PlanarPoint {
        PlanarPoint::new(self.x / speed_mps, self.y / speed_mps)
    }
}

impl std::fmt::Display for PlanarPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
