use rr_core::{CoreError, VertexId};
use rr_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("source and target both resolve to {0}")]
    DegenerateQuery(VertexId),

    #[error("path search exceeded its deadline")]
    DeadlineExceeded,

    #[error("path search was cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
