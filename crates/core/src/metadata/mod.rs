//! Movie metadata lookups against an external provider.
//!
//! A lookup resolves one title into a [`MovieRecord`] or a [`LookupError`]
//! tagged with the reason it failed.

mod classify;
mod omdb;
mod types;

pub use classify::{classify, Classified, NOT_FOUND_SENTINEL};
pub use omdb::OmdbClient;
pub use types::MovieRecord;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Why a single lookup failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupFailure {
    /// Connection, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider returned its not-found sentinel.
    #[error("movie not found")]
    NotFound,

    /// Body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Provider refused the request (bad key, rate limit, ...).
    #[error("provider rejected lookup: {0}")]
    Rejected(String),

    /// The lookup task panicked or was cancelled.
    #[error("lookup task failed: {0}")]
    TaskFailed(String),
}

impl LookupFailure {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupFailure::Transport(_) => "transport",
            LookupFailure::NotFound => "not_found",
            LookupFailure::Malformed(_) => "malformed",
            LookupFailure::Rejected(_) => "rejected",
            LookupFailure::TaskFailed(_) => "task_failed",
        }
    }
}

/// A failed lookup, carrying the title it was for.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("lookup for {title:?} failed: {cause}")]
pub struct LookupError {
    pub title: String,
    #[source]
    pub cause: LookupFailure,
}

impl LookupError {
    pub fn new(title: impl Into<String>, cause: LookupFailure) -> Self {
        Self {
            title: title.into(),
            cause,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.cause.kind()
    }
}

/// Errors raised while building a metadata client.
#[derive(Debug, Error)]
pub enum MetadataClientError {
    /// Client not configured (missing API key, bad base URL).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Trait for metadata providers.
///
/// One call is one attempt; implementations do not retry.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Look up a single title.
    async fn fetch(&self, title: &str) -> Result<MovieRecord, LookupError>;
}
