//! Deadlines and cancellation for path searches.
//!
//! Dijkstra and A* have no natural bound on a large graph where the target
//! is unreachable.  A search polls its [`SearchLimits`] every
//! [`CHECK_INTERVAL`] heap pops and gives up with
//! [`RoutingError::DeadlineExceeded`] or [`RoutingError::Cancelled`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::{RoutingError, RoutingResult};

/// Heap pops between limit checks.  The first pop is always checked.
pub const CHECK_INTERVAL: u64 = 256;

/// Shared cancellation flag.  Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-search bounds.  The default imposes none.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub cancel:   Option<CancelToken>,
}

impl SearchLimits {
    pub fn none() -> Self {
        Self::default()
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { deadline: Some(Instant::now() + timeout), cancel: None }
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Called by the search loop with its pop counter.
    #[inline]
    pub(crate) fn poll(&self, pops: u64) -> RoutingResult<()> {
        if pops % CHECK_INTERVAL != 0 {
            return Ok(());
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(RoutingError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(RoutingError::DeadlineExceeded);
        }
        Ok(())
    }
}
