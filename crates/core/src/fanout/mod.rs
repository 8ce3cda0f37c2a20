//! Concurrent batch lookups under a fixed concurrency bound.
//!
//! [`aggregate_all`] is the fan-out/fan-in primitive; [`FanOut`] bundles a
//! client with a capacity for callers that run many batches.

mod aggregate;
mod permits;

pub use aggregate::{aggregate_all, Aggregate};
pub use permits::{Permit, PermitPool, PoolClosed, DEFAULT_CAPACITY};

use std::sync::Arc;

use crate::metadata::MetadataClient;

/// A metadata client paired with the concurrency bound for its batches.
///
/// Each [`FanOut::run`] gets its own permit pool, so the bound applies per
/// batch.
#[derive(Clone)]
pub struct FanOut {
    client: Arc<dyn MetadataClient>,
    capacity: usize,
}

impl FanOut {
    pub fn new(client: Arc<dyn MetadataClient>, capacity: usize) -> Self {
        Self {
            client,
            capacity: capacity.max(1),
        }
    }

    /// Per-batch concurrency bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up all titles and collect the outcomes.
    pub async fn run(&self, titles: Vec<String>) -> Aggregate {
        let pool = PermitPool::new(self.capacity);
        aggregate_all(Arc::clone(&self.client), titles, &pool).await
    }
}

impl std::fmt::Debug for FanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOut")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
