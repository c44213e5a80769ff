//! Road classification and the fixed speed table.
//!
//! Classes follow the national topographic database labels carried in the
//! input geometry (`klasaDrogi`).  The speed table must match exactly: travel
//! times in snapshots and query results are derived from it.
//!
//! | Label | Class                       | Speed (km/h) |
//! |-------|-----------------------------|--------------|
//! | `A`   | motorway                    | 140          |
//! | `S`   | expressway                  | 120          |
//! | `GP`  | main road, accelerated      | 100          |
//! | `G`   | main road                   | 90           |
//! | `Z`   | collector                   | 50           |
//! | `L`   | local                       | 50           |
//! | `D`   | access                      | 50           |
//! | `I`   | other                       | 50           |
//! | *any* | unrecognised label          | 50           |

use serde::{Deserialize, Serialize};

/// Speed assumed for labels outside the table.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Fastest speed anywhere in the table.  Bounds the A* heuristic.
pub const MAX_SPEED_KMH: f64 = 140.0;

/// Convert km/h to m/s.
#[inline]
pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Classification of a road edge.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoadClass {
    Motorway,
    Expressway,
    MainAccelerated,
    Main,
    Collector,
    Local,
    Access,
    Other,
    /// A label the table does not know; kept verbatim for snapshots.
    Unknown(String),
}

impl RoadClass {
    /// Parse a dataset label.  Surrounding whitespace is ignored and an
    /// unrecognised label is preserved as [`RoadClass::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "A"  => RoadClass::Motorway,
            "S"  => RoadClass::Expressway,
            "GP" => RoadClass::MainAccelerated,
            "G"  => RoadClass::Main,
            "Z"  => RoadClass::Collector,
            "L"  => RoadClass::Local,
            "D"  => RoadClass::Access,
            "I"  => RoadClass::Other,
            other => RoadClass::Unknown(other.to_owned()),
        }
    }

    /// Dataset label, as written to snapshots.
    pub fn label(&self) -> &str {
        match self {
            RoadClass::Motorway        => "A",
            RoadClass::Expressway      => "S",
            RoadClass::MainAccelerated => "GP",
            RoadClass::Main            => "G",
            RoadClass::Collector       => "Z",
            RoadClass::Local           => "L",
            RoadClass::Access          => "D",
            RoadClass::Other           => "I",
            RoadClass::Unknown(s)      => s,
        }
    }

    /// Assumed legal speed in km/h.
    pub fn speed_kmh(&self) -> f64 {
        match self {
            RoadClass::Motorway        => 140.0,
            RoadClass::Expressway      => 120.0,
            RoadClass::MainAccelerated => 100.0,
            RoadClass::Main            => 90.0,
            RoadClass::Collector
            | RoadClass::Local
            | RoadClass::Access
            | RoadClass::Other         => 50.0,
            RoadClass::Unknown(_)      => DEFAULT_SPEED_KMH,
        }
    }

    #[inline]
    pub fn speed_mps(&self) -> f64 {
        kmh_to_mps(self.speed_kmh())
    }

    /// Travel time in seconds for `length_m` metres at this class's speed.
    #[inline]
    pub fn travel_time_s(&self, length_m: f64) -> f64 {
        length_m / self.speed_mps()
    }
}

impl From<String> for RoadClass {
    fn from(s: String) -> Self {
        RoadClass::from_label(&s)
    }
}

impl From<RoadClass> for String {
    fn from(c: RoadClass) -> Self {
        c.label().to_owned()
    }
}

impl std::fmt::Display for RoadClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
