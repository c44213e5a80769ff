//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `rr-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({0}, {1}): outside the projection domain")]
    InvalidCoordinate(f64, f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `rr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
