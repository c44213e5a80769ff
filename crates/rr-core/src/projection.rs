//! Geographic ⇄ planar coordinate conversion.
//!
//! # Projection
//!
//! The road dataset is stored in EPSG:2180 ("PUWG 1992"): a transverse
//! Mercator projection on the GRS80 ellipsoid.
//!
//! | Parameter         | Value          |
//! |-------------------|----------------|
//! | Central meridian  | 19° E          |
//! | Latitude origin   | 0°             |
//! | Scale factor      | 0.9993         |
//! | False easting     | 500 000 m      |
//! | False northing    | −5 300 000 m   |
//!
//! The forward and inverse transforms use Krüger's series in the third
//! flattening `n`, truncated at `n³`.  Truncation error is well below a
//! millimetre inside a few thousand kilometres of the central meridian, so
//! round-trips are exact to sub-metre tolerance over the whole usable zone.
//!
//! Axis order is always `(lon, lat)` ⇄ `(x = easting, y = northing)`.

use std::f64::consts::FRAC_PI_2;

use crate::{CoreError, CoreResult, GeoPoint, PlanarPoint};

/// Conversion between geographic and projected coordinates.
///
/// Implementations must be pure so a single projector can be shared across
/// query threads.
pub trait Projector: Send + Sync {
    /// `(lon, lat)` in degrees → projected `(x, y)` in metres.
    fn to_projected(&self, geo: GeoPoint) -> CoreResult<PlanarPoint>;

    /// Projected `(x, y)` in metres → `(lon, lat)` in degrees.
    fn to_geographic(&self, planar: PlanarPoint) -> CoreResult<GeoPoint>;
}

/// Furthest longitude offset from the central meridian accepted as input.
/// The series diverges as the offset approaches 90° at the equator.
const MAX_LON_OFFSET_DEG: f64 = 60.0;

/// Transverse Mercator on an ellipsoid, parameterised by datum and grid
/// constants.  [`Puwg1992`] is the only configuration the router uses.
#[derive(Clone, Debug)]
pub struct TransverseMercator {
    lon0: f64, // radians
    false_easting: f64,
    false_northing: f64,
    /// First eccentricity.
    e: f64,
    /// Rectifying radius `A`, pre-multiplied by `k0`.
    k0_a: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
}

impl TransverseMercator {
    /// Build a projection from ellipsoid (`a`, inverse flattening) and grid
    /// constants.
    pub fn new(
        semi_major: f64,
        inv_flattening: f64,
        lon0_deg: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let f = 1.0 / inv_flattening;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;

        let a_rect = semi_major / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        Self {
            lon0: lon0_deg.to_radians(),
            false_easting,
            false_northing,
            e: (f * (2.0 - f)).sqrt(),
            k0_a: k0 * a_rect,
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
                61.0 * n3 / 240.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
                n2 / 48.0 + n3 / 15.0,
                17.0 * n3 / 480.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
                56.0 * n3 / 15.0,
            ],
        }
    }
}

impl Projector for TransverseMercator {
    fn to_projected(&self, geo: GeoPoint) -> CoreResult<PlanarPoint> {
        let invalid = || CoreError::InvalidCoordinate(geo.lon, geo.lat);

        if !geo.lon.is_finite() || !geo.lat.is_finite() {
            return Err(invalid());
        }
        if geo.lat.abs() > 90.0 || geo.lon.abs() > 180.0 {
            return Err(invalid());
        }
        let d_lon = geo.lon.to_radians() - self.lon0;
        if d_lon.abs() > MAX_LON_OFFSET_DEG.to_radians() {
            return Err(invalid());
        }

        let phi = geo.lat.to_radians();
        let sin_phi = phi.sin();

        // Conformal latitude, as its tangent.
        let t = (sin_phi.atanh() - self.e * (self.e * sin_phi).atanh()).sinh();

        let xi_p = t.atan2(d_lon.cos());
        let eta_p = (d_lon.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, &a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let planar = PlanarPoint::new(
            self.false_easting + self.k0_a * eta,
            self.false_northing + self.k0_a * xi,
        );
        if !planar.is_finite() {
            return Err(invalid());
        }
        Ok(planar)
    }

    fn to_geographic(&self, planar: PlanarPoint) -> CoreResult<GeoPoint> {
        let invalid = || CoreError::InvalidCoordinate(planar.x, planar.y);

        if !planar.is_finite() {
            return Err(invalid());
        }

        let xi = (planar.y - self.false_northing) / self.k0_a;
        let eta = (planar.x - self.false_easting) / self.k0_a;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, &b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let mut phi = chi;
        for (j, &d) in self.delta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            phi += d * (k * chi).sin();
        }
        let lambda = self.lon0 + eta_p.sinh().atan2(xi_p.cos());

        if !phi.is_finite() || !lambda.is_finite() || phi.abs() > FRAC_PI_2 + 1e-12 {
            return Err(invalid());
        }

        let geo = GeoPoint::new(lambda.to_degrees(), phi.to_degrees());
        if geo.lon.abs() > 180.0 {
            return Err(invalid());
        }
        Ok(geo)
    }
}

/// EPSG:2180, the native CRS of the road dataset.
#[derive(Clone, Debug)]
pub struct Puwg1992(TransverseMercator);

impl Puwg1992 {
    pub const SEMI_MAJOR_M: f64 = 6_378_137.0;
    pub const INV_FLATTENING: f64 = 298.257_222_101;
    pub const CENTRAL_MERIDIAN_DEG: f64 = 19.0;
    pub const SCALE_FACTOR: f64 = 0.9993;
    pub const FALSE_EASTING_M: f64 = 500_000.0;
    pub const FALSE_NORTHING_M: f64 = -5_300_000.0;

    pub fn new() -> Self {
        Self(TransverseMercator::new(
            Self::SEMI_MAJOR_M,
            Self::INV_FLATTENING,
            Self::CENTRAL_MERIDIAN_DEG,
            Self::SCALE_FACTOR,
            Self::FALSE_EASTING_M,
            Self::FALSE_NORTHING_M,
        ))
    }
}

impl Default for Puwg1992 {
    fn default() -> Self {
        Self::new()
    }
}

impl Projector for Puwg1992 {
    #[inline]
    fn to_projected(&self, geo: GeoPoint) -> CoreResult<PlanarPoint> {
        self.0.to_projected(geo)
    }

    #[inline]
    fn to_geographic(&self, planar: PlanarPoint) -> CoreResult<GeoPoint> {
        self.0.to_geographic(planar)
    }
}
