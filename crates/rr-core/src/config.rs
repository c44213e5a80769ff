//! Router configuration.
//!
//! Typically loaded from a JSON file by the application and passed to the
//! graph builder and route planner.  Every field has a default, so a config
//! file only needs to name what it overrides:
//!
//! ```json
//! { "merge_strategy": "indexed", "search_deadline_ms": 250 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// How the graph builder finds an existing vertex for a segment endpoint.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Scan every committed vertex.  O(n²) over the build; fine for small
    /// inputs and the reference behaviour.
    #[default]
    Linear,
    /// R-tree over committed vertices.  Same result as `Linear`.
    Indexed,
}

/// Top-level router configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Endpoints closer than or equal to this (projected units) share a
    /// vertex.  Default: 0.5.
    pub merge_tolerance: f64,

    /// Endpoint merge implementation.  Default: `Linear`.
    pub merge_strategy: MergeStrategy,

    /// Query points snap only to vertices strictly closer than this.
    /// Default: 150.
    pub max_snap_distance: f64,

    /// Wall-clock budget per path search.  `None` means unbounded.
    pub search_deadline_ms: Option<u64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            merge_tolerance:    0.5,
            merge_strategy:     MergeStrategy::Linear,
            max_snap_distance:  150.0,
            search_deadline_ms: None,
        }
    }
}

impl RouterConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        let config: RouterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no build or query could use.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.merge_tolerance.is_finite() || self.merge_tolerance < 0.0 {
            return Err(CoreError::Config(format!(
                "merge_tolerance must be a non-negative number, got {}",
                self.merge_tolerance
            )));
        }
        if !self.max_snap_distance.is_finite() || self.max_snap_distance < 0.0 {
            return Err(CoreError::Config(format!(
                "max_snap_distance must be a non-negative number, got {}",
                self.max_snap_distance
            )));
        }
        Ok(())
    }

    pub fn search_deadline(&self) -> Option<Duration> {
        self.search_deadline_ms.map(Duration::from_millis)
    }
}
