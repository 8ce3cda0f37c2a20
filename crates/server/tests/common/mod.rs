//! Common test utilities for in-process API testing with mocks.
//!
//! This module provides a test fixture that builds the real router with a
//! mock metadata client, a temporary titles file and a temporary static
//! directory, so no network access is needed.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cinefetch_core::{
    testing::MockMetadataClient, Config, FileTitleSource, MetadataClient, StaticTitleSource,
    TitleSource,
};
use cinefetch_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use cinefetch_core::testing::fixtures;

/// Markup written to the temporary static directory.
pub const INDEX_HTML: &str = "<!doctype html><title>cinefetch</title>";

/// Test fixture for API testing with a mock metadata client.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_movies() {
///     let fixture = TestFixture::with_titles(&["Heat"]).await;
///     fixture.client.add_movie(fixtures::movie("Heat", "1995", "Michael Mann")).await;
///
///     let response = fixture.get("/api/movies").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock metadata client - script lookup outcomes
    pub client: Arc<MockMetadataClient>,
    /// Path of the titles file (may not exist)
    pub titles_path: PathBuf,
    /// Temporary directory holding the titles file and static files
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Fixture with the given lines written to the titles file.
    pub async fn with_titles(titles: &[&str]) -> Self {
        let fixture = Self::without_titles_file(TestConfig::default()).await;
        let contents: String = titles.iter().map(|t| format!("{}\n", t)).collect();
        std::fs::write(&fixture.titles_path, contents).expect("Failed to write titles file");
        fixture
    }

    /// Fixture whose titles come from memory; no titles file is written.
    pub async fn with_static_titles(titles: &[&str]) -> Self {
        let source: Arc<dyn TitleSource> = Arc::new(StaticTitleSource::new(titles.to_vec()));
        Self::build(TestConfig::default(), Some(source))
    }

    /// Fixture whose titles file has not been created.
    pub async fn without_titles_file(test_config: TestConfig) -> Self {
        Self::build(test_config, None)
    }

    fn build(test_config: TestConfig, titles: Option<Arc<dyn TitleSource>>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let titles_path = temp_dir.path().join("movies.txt");
        let static_dir = temp_dir.path().join("views");
        std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
        std::fs::write(static_dir.join("index.html"), INDEX_HTML)
            .expect("Failed to write index.html");

        let mut config = Config::default();
        config.server.host = std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST);
        config.server.static_dir = static_dir;
        config.omdb.api_key = "test-secret-key".to_string();
        config.titles.path = titles_path.clone();
        config.fetch.max_concurrent_lookups = test_config.max_concurrent_lookups;

        let client = Arc::new(MockMetadataClient::new());
        let titles: Arc<dyn TitleSource> = match titles {
            Some(source) => source,
            None => Arc::new(FileTitleSource::new(titles_path.clone())),
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&client) as Arc<dyn MetadataClient>,
            titles,
        ));

        // Create router
        let router = create_router(state);

        Self {
            router,
            client,
            titles_path,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        let text = String::from_utf8_lossy(&body_bytes).into_owned();

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Fan-out bound for the movie list endpoint
    pub max_concurrent_lookups: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: 10,
        }
    }
}
