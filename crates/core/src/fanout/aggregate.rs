//! Bounded fan-out of lookups and fan-in of their outcomes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info};

use super::permits::PermitPool;
use crate::metadata::{LookupError, LookupFailure, MetadataClient, MovieRecord};
use crate::metrics::{
    BATCH_DURATION, BATCH_SIZE, LOOKUPS_IN_FLIGHT, LOOKUPS_TOTAL, LOOKUP_DURATION,
};

/// Result of a batch: every input title lands in exactly one list.
///
/// Neither list follows input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregate {
    pub records: Vec<MovieRecord>,
    pub errors: Vec<LookupError>,
}

impl Aggregate {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            errors: Vec::with_capacity(capacity),
        }
    }

    /// Number of outcomes, equal to the number of input titles.
    pub fn total(&self) -> usize {
        self.records.len() + self.errors.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Error counts keyed by failure kind.
    pub fn errors_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for err in &self.errors {
            *counts.entry(err.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Look up every title with at most `pool.capacity()` lookups in flight.
///
/// Dispatch waits for a free permit before spawning each lookup, so a full
/// pool stalls the loop rather than queueing tasks. Individual failures are
/// collected, never propagated.
pub async fn aggregate_all(
    client: Arc<dyn MetadataClient>,
    titles: Vec<String>,
    pool: &PermitPool,
) -> Aggregate {
    let started = Instant::now();
    let total = titles.len();
    BATCH_SIZE.with_label_values(&[]).observe(total as f64);

    let mut aggregate = Aggregate::with_capacity(total);
    let mut lanes = Vec::with_capacity(total);

    for title in titles {
        let permit = match pool.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                error!(title = %title, error = %e, "Could not dispatch lookup");
                aggregate.errors.push(LookupError::new(
                    title,
                    LookupFailure::TaskFailed(e.to_string()),
                ));
                continue;
            }
        };

        let client = Arc::clone(&client);
        let task_title = title.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            lookup(client.as_ref(), &task_title).await
        });
        lanes.push((title, handle));
    }

    let joined = join_all(
        lanes
            .into_iter()
            .map(|(title, handle)| async move { (title, handle.await) }),
    )
    .await;

    for (title, outcome) in joined {
        match outcome {
            Ok(Ok(record)) => aggregate.records.push(record),
            Ok(Err(err)) => aggregate.errors.push(err),
            Err(join_error) => {
                error!(title = %title, error = %join_error, "Lookup task failed");
                LOOKUPS_TOTAL.with_label_values(&["task_failed"]).inc();
                aggregate.errors.push(LookupError::new(
                    title,
                    LookupFailure::TaskFailed(join_error.to_string()),
                ));
            }
        }
    }

    let elapsed = started.elapsed();
    BATCH_DURATION
        .with_label_values(&[])
        .observe(elapsed.as_secs_f64());
    info!(
        titles = total,
        records = aggregate.records.len(),
        errors = aggregate.errors.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Fan-out batch complete"
    );

    aggregate
}

/// Decrements the in-flight gauge even if the lookup panics.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        LOOKUPS_IN_FLIGHT.inc();
        InFlight
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        LOOKUPS_IN_FLIGHT.dec();
    }
}

async fn lookup(client: &dyn MetadataClient, title: &str) -> Result<MovieRecord, LookupError> {
    let _in_flight = InFlight::enter();
    let started = Instant::now();

    let result = client.fetch(title).await;

    let label = match &result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };
    LOOKUPS_TOTAL.with_label_values(&[label]).inc();
    LOOKUP_DURATION
        .with_label_values(&[label])
        .observe(started.elapsed().as_secs_f64());
    debug!(title = %title, result = label, "Lookup finished");

    result
}
