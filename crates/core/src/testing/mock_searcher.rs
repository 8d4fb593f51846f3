//! Mock searcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::searcher::{Candidate, SearchError, SearchRequest, Searcher};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The request that was searched.
    pub request: SearchRequest,
    /// When the search was made.
    pub timestamp: Instant,
}

/// A query handler that produces results dynamically based on the query.
type QueryHandler = Box<dyn Fn(&SearchRequest) -> Option<Vec<Candidate>> + Send + Sync>;

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable results per exact query string
/// - Track search requests and link resolutions for assertions
/// - Simulate failures, delays and unresolvable links
///
/// # Example
///
/// ```rust,ignore
/// use streamfinder_core::testing::{MockSearcher, fixtures};
///
/// let searcher = MockSearcher::new();
/// searcher
///     .set_results("Game of Thrones S01E01", vec![fixtures::candidate("GoT S01E01 1080p", 50, "2 GB")])
///     .await;
///
/// let searches = searcher.recorded_searches().await;
/// ```
pub struct MockSearcher {
    /// Results per exact query string.
    results: Arc<RwLock<HashMap<String, Vec<Candidate>>>>,
    /// Recorded search requests.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Simulated latency for every search.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Playable link overrides by source link. Missing entries resolve to the
    /// source link itself.
    links: Arc<RwLock<HashMap<String, Option<String>>>>,
    /// Titles of candidates whose link was resolved.
    link_resolutions: Arc<RwLock<Vec<String>>>,
    /// Query handler, consulted before the results map.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearcher")
            .field("results", &"<results>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("links", &"<links>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher that finds nothing.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            links: Arc::new(RwLock::new(HashMap::new())),
            link_resolutions: Arc::new(RwLock::new(Vec::new())),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results returned for one exact query string.
    pub async fn set_results(&self, query: &str, results: Vec<Candidate>) {
        self.results.write().await.insert(query.to_string(), results);
    }

    /// Clear all results.
    pub async fn clear_results(&self) {
        self.results.write().await.clear();
    }

    /// Get recorded search requests.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Recorded query strings, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.searches
            .read()
            .await
            .iter()
            .map(|s| s.request.query.clone())
            .collect()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every search by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Override the playable link for a source link; `None` makes it
    /// unresolvable.
    pub async fn set_link(&self, source_link: &str, playable: Option<String>) {
        self.links
            .write()
            .await
            .insert(source_link.to_string(), playable);
    }

    /// Titles of candidates whose link was resolved, in call order.
    pub async fn recorded_link_resolutions(&self) -> Vec<String> {
        self.link_resolutions.read().await.clone()
    }

    /// Set a query handler that generates results from the request.
    ///
    /// Returning `None` falls through to the results map.
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&SearchRequest) -> Option<Vec<Candidate>> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<SearchError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, SearchError> {
        self.searches.write().await.push(RecordedSearch {
            request: request.clone(),
            timestamp: Instant::now(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        {
            let handler = self.query_handler.read().await;
            if let Some(results) = handler.as_ref().and_then(|h| h(request)) {
                return Ok(results);
            }
        }

        Ok(self
            .results
            .read()
            .await
            .get(&request.query)
            .cloned()
            .unwrap_or_default())
    }

    async fn resolve_playable_link(
        &self,
        candidate: &Candidate,
    ) -> Result<Option<String>, SearchError> {
        self.link_resolutions
            .write()
            .await
            .push(candidate.title.clone());

        let links = self.links.read().await;
        Ok(match links.get(&candidate.source_link) {
            Some(link) => link.clone(),
            None => Some(candidate.source_link.clone()),
        })
    }
}
