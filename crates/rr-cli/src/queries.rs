//! Query input: `lon,lat` arguments and batch query CSVs.
//!
//! Batch CSV columns:
//!
//! ```text
//! source_lon,source_lat,target_lon,target_lat
//! 19.9373,50.0617,19.9450,50.0647
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use rr_core::GeoPoint;

/// Parse `"lon,lat"` into a point.  Range checks happen at projection time.
pub fn parse_lon_lat(s: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lon,lat`, got `{s}`"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude `{lon}`: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude `{lat}`: {e}"))?;
    Ok(GeoPoint::new(lon, lat))
}

/// One row of a batch query file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct QueryRow {
    pub source_lon: f64,
    pub source_lat: f64,
    pub target_lon: f64,
    pub target_lat: f64,
}

impl QueryRow {
    pub fn source(&self) -> GeoPoint {
        GeoPoint::new(self.source_lon, self.source_lat)
    }

    pub fn target(&self) -> GeoPoint {
        GeoPoint::new(self.target_lon, self.target_lat)
    }
}

pub fn load_queries(path: &Path) -> Result<Vec<QueryRow>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_queries(file).with_context(|| format!("reading {}", path.display()))
}

/// Read query rows.  Unlike segment files, a malformed row is fatal.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<QueryRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (i, row) in rdr.deserialize::<QueryRow>().enumerate() {
        // Line 1 is the header.
        rows.push(row.with_context(|| format!("query on line {}", i + 2))?);
    }
    Ok(rows)
}
