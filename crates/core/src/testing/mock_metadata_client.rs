//! Mock metadata client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::metadata::{LookupError, LookupFailure, MetadataClient, MovieRecord};

/// Scripted outcome for one title.
#[derive(Debug, Clone)]
pub enum ScriptedLookup {
    Record(MovieRecord),
    Fail(LookupFailure),
    /// Panic inside `fetch`, to exercise task failure handling.
    Panic,
}

/// Mock implementation of the MetadataClient trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable records or failures per title
/// - Delay every lookup to force overlap
/// - Record looked-up titles and the peak number of concurrent calls
///
/// Titles without a script fail with [`LookupFailure::NotFound`].
///
/// # Example
///
/// ```rust,ignore
/// use cinefetch_core::testing::{fixtures, MockMetadataClient};
///
/// let client = MockMetadataClient::new();
/// client.add_movie(fixtures::movie("Inception", "2010", "Christopher Nolan")).await;
///
/// let record = client.fetch("Inception").await?;
/// assert_eq!(record.year, "2010");
/// ```
#[derive(Debug)]
pub struct MockMetadataClient {
    /// Scripted outcomes by title.
    responses: Arc<RwLock<HashMap<String, ScriptedLookup>>>,
    /// Delay applied to every lookup.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Titles in call order.
    calls: Arc<RwLock<Vec<String>>>,
    /// Lookups currently inside `fetch`.
    current: Arc<AtomicUsize>,
    /// Highest value `current` has reached.
    peak: Arc<AtomicUsize>,
}

impl Default for MockMetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMetadataClient {
    /// Create a mock with no scripted titles.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            delay: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
            current: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Resolve `record.title` to `record`.
    pub async fn add_movie(&self, record: MovieRecord) {
        self.responses
            .write()
            .await
            .insert(record.title.clone(), ScriptedLookup::Record(record));
    }

    /// Fail lookups of `title` with `cause`.
    pub async fn fail_title(&self, title: &str, cause: LookupFailure) {
        self.set_response(title, ScriptedLookup::Fail(cause)).await;
    }

    /// Set the scripted outcome for `title`.
    pub async fn set_response(&self, title: &str, response: ScriptedLookup) {
        self.responses
            .write()
            .await
            .insert(title.to_string(), response);
    }

    /// Sleep for `delay` inside every lookup.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Titles looked up so far, in call order.
    pub async fn recorded_titles(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Number of lookups performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Most lookups ever observed inside `fetch` at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Lookups inside `fetch` right now.
    pub fn current_concurrency(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataClient for MockMetadataClient {
    async fn fetch(&self, title: &str) -> Result<MovieRecord, LookupError> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        self.calls.write().await.push(title.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.responses.read().await.get(title).cloned();
        self.current.fetch_sub(1, Ordering::SeqCst);

        match scripted {
            Some(ScriptedLookup::Record(record)) => Ok(record),
            Some(ScriptedLookup::Fail(failure)) => Err(LookupError::new(title, failure)),
            Some(ScriptedLookup::Panic) => panic!("scripted panic for {:?}", title),
            None => Err(LookupError::new(title, LookupFailure::NotFound)),
        }
    }
}
