//! Sources of movie titles to look up.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TitleSourceError {
    #[error("Failed to read titles from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the ordered list of titles for a batch.
#[async_trait]
pub trait TitleSource: Send + Sync {
    async fn load(&self) -> Result<Vec<String>, TitleSourceError>;
}

/// Split newline-delimited text into titles.
///
/// A trailing `\r` is stripped from each line and a final newline does not
/// produce an extra entry. Blank lines are kept.
pub fn parse_titles(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_string).collect()
}

/// Reads titles from a text file, one per line, on every call.
#[derive(Debug, Clone)]
pub struct FileTitleSource {
    path: PathBuf,
}

impl FileTitleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TitleSource for FileTitleSource {
    async fn load(&self) -> Result<Vec<String>, TitleSourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TitleSourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let titles = parse_titles(&contents);
        debug!(path = %self.path.display(), count = titles.len(), "Loaded titles");
        Ok(titles)
    }
}

/// Fixed in-memory title list.
#[derive(Debug, Clone, Default)]
pub struct StaticTitleSource {
    titles: Vec<String>,
}

impl StaticTitleSource {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TitleSource for StaticTitleSource {
    async fn load(&self) -> Result<Vec<String>, TitleSourceError> {
        Ok(self.titles.clone())
    }
}
