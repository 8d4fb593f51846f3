//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that builds the router in-process
//! with mock collaborators injected, so addon endpoints can be exercised
//! without a live index or metadata service.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use streamfinder_core::{
    config::{
        AddonConfig, CacheConfig, JackettConfig, SearcherBackend, SearcherConfig, ServerConfig,
    },
    query::VariationGenerator,
    testing::{MockMetadataClient, MockSearcher},
    Config, MemoryCache, MetadataClient, PipelineConfig, StreamCache, StreamPipeline,
};

/// Re-export fixtures for test convenience
pub use streamfinder_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_streams() {
///     let fixture = TestFixture::new();
///     let response = fixture.get("/stream/movie/tt0111161.json").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock searcher - configure search results
    pub searcher: Arc<MockSearcher>,
    /// Mock metadata client - configure title lookups
    pub metadata: Arc<MockMetadataClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let searcher = Arc::new(MockSearcher::new());
        let metadata = Arc::new(MockMetadataClient::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 7000, // Not used for in-process testing
            },
            addon: AddonConfig {
                name: test_config.source_name.clone(),
                logo: test_config.logo.clone(),
                ..Default::default()
            },
            metadata: None,
            searcher: SearcherConfig {
                backend: SearcherBackend::Jackett,
                jackett: Some(JackettConfig {
                    url: "http://localhost:9117".to_string(),
                    api_key: "secret-jackett-key".to_string(),
                    indexer: "all".to_string(),
                    timeout_secs: 10,
                    max_results: 20,
                }),
            },
            pipeline: PipelineConfig::default(),
            cache: CacheConfig {
                enabled: test_config.enable_cache,
                ..Default::default()
            },
        };

        let mut pipeline = StreamPipeline::new(searcher.clone(), config.pipeline.clone())
            .with_metadata(metadata.clone() as Arc<dyn MetadataClient>)
            .with_source_name(config.addon.name.clone())
            .with_variation_generator(VariationGenerator::with_current_year(2025));
        if test_config.enable_cache {
            pipeline = pipeline.with_cache(Arc::new(MemoryCache::new(std::time::Duration::from_secs(
                config.cache.ttl_secs,
            ))) as Arc<dyn StreamCache>);
        }

        let state = Arc::new(streamfinder_server::state::AppState::new(
            config,
            Arc::new(pipeline),
        ));
        let router = streamfinder_server::api::create_router(state);

        Self {
            router,
            searcher,
            metadata,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
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
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            content_type,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Source name shown in stream labels
    pub source_name: String,
    /// Use an in-memory stream cache
    pub enable_cache: bool,
    /// Manifest logo URL
    pub logo: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            source_name: "1337x".to_string(),
            enable_cache: false,
            logo: None,
        }
    }
}

impl TestConfig {
    /// Create config with the stream cache enabled.
    pub fn with_cache() -> Self {
        Self {
            enable_cache: true,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
