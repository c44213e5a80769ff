//! Network-subsystem error type.

use thiserror::Error;

use rr_core::{PlanarPoint, VertexId};

/// Errors produced by `rr-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("graph is empty: {0}")]
    EmptyGraph(&'static str),

    #[error("no vertex within {max_distance} of {point}")]
    NoVertexInRange { point: PlanarPoint, max_distance: f64 },

    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
