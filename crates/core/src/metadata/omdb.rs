//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key for access. Lookups are by exact title via the
//! `t` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::classify::{classify, Classified};
use super::types::MovieRecord;
use super::{LookupError, LookupFailure, MetadataClient, MetadataClientError};
use crate::config::OmdbConfig;

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: &OmdbConfig) -> Result<Self, MetadataClientError> {
        if config.api_key.trim().is_empty() {
            return Err(MetadataClientError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            MetadataClientError::NotConfigured(format!(
                "invalid OMDb base URL {:?}: {}",
                config.base_url, e
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL lookups are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn transport_error(title: &str, e: reqwest::Error) -> LookupError {
        // The request URL carries the API key; keep it out of errors and logs
        let e = e.without_url();
        let reason = if e.is_timeout() {
            format!("request timed out: {}", e)
        } else {
            e.to_string()
        };
        warn!(title = %title, error = %reason, "OMDb request failed");
        LookupError::new(title, LookupFailure::Transport(reason))
    }
}

#[async_trait]
impl MetadataClient for OmdbClient {
    async fn fetch(&self, title: &str) -> Result<MovieRecord, LookupError> {
        debug!("OMDb lookup: title='{}'", title);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(|e| Self::transport_error(title, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(title, e))?;

        let classified = classify(&body);
        if classified == Classified::Empty {
            debug!(title = %title, "No additional movie info found");
        }

        let result = classified.into_result(title);
        if let Err(ref err) = result {
            warn!(
                title = %title,
                status = status.as_u16(),
                kind = err.kind(),
                error = %err.cause,
                "OMDb lookup failed"
            );
        }
        result
    }
}
