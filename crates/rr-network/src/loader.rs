//! CSV road-segment loader.
//!
//! # CSV format
//!
//! One row per road segment, coordinates in the projected CRS:
//!
//! ```csv
//! start_x,start_y,end_x,end_y,length,class
//! 637382.2,486757.2,637482.2,486757.2,100.0,L
//! 637482.2,486757.2,637482.2,486857.2,104.3,G
//! ,,637482.2,486957.2,100.0,Z
//! ```
//!
//! An empty coordinate field means the endpoint is missing.  Such rows, and
//! rows that fail to parse at all, are logged and skipped rather than
//! aborting the load; the graph builder then discards any remaining
//! degenerate geometry.

use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use rr_core::PlanarPoint;

use crate::builder::RoadSegmentRecord;
use crate::NetworkResult;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRow {
    start_x: Option<f64>,
    start_y: Option<f64>,
    end_x:   Option<f64>,
    end_y:   Option<f64>,
    length:  Option<f64>,
    #[serde(default)]
    class:   String,
}

impl SegmentRow {
    fn into_record(self) -> RoadSegmentRecord {
        let point = |x: Option<f64>, y: Option<f64>| match (x, y) {
            (Some(x), Some(y)) => Some(PlanarPoint::new(x, y)),
            _ => None,
        };
        RoadSegmentRecord {
            start:  point(self.start_x, self.start_y),
            end:    point(self.end_x, self.end_y),
            // A missing length fails validation in the builder.
            length: self.length.unwrap_or(f64::NAN),
            class:  self.class,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load road-segment records from a CSV file.
pub fn load_segments_csv(path: &Path) -> NetworkResult<Vec<RoadSegmentRecord>> {
    let file = std::fs::File::open(path)?;
    load_segments_reader(file)
}

/// Like [`load_segments_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for segments streamed
/// from a collaborating process.
pub fn load_segments_reader<R: Read>(reader: R) -> NetworkResult<Vec<RoadSegmentRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    // Header problems are fatal: nothing after them can be interpreted.
    csv_reader.headers()?;

    let mut records = Vec::new();
    let mut unreadable = 0usize;

    for (line, result) in csv_reader.deserialize::<SegmentRow>().enumerate() {
        match result {
            Ok(row) => records.push(row.into_record()),
            Err(e) => {
                unreadable += 1;
                warn!("skipping unreadable segment row {}: {e}", line + 2);
            }
        }
    }

    info!("loaded {} segment records ({} unreadable rows skipped)", records.len(), unreadable);
    Ok(records)
}
