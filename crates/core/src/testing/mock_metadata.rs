//! Mock metadata client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::metadata::{MetadataClient, MetadataError, TitleMetadata};

/// Mock implementation of the MetadataClient trait.
///
/// Unknown identifiers answer `NotFound`, like a real provider would.
///
/// # Example
///
/// ```rust,ignore
/// use streamfinder_core::testing::{MockMetadataClient, fixtures};
///
/// let metadata = MockMetadataClient::new();
/// metadata.set_metadata("tt0944947", fixtures::series_metadata("Game of Thrones", 2011)).await;
/// ```
#[derive(Debug)]
pub struct MockMetadataClient {
    /// Metadata by external id.
    titles: Arc<RwLock<HashMap<String, TitleMetadata>>>,
    /// Recorded lookups.
    lookups: Arc<RwLock<Vec<String>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<MetadataError>>>,
    /// Simulated latency for every lookup.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockMetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMetadataClient {
    pub fn new() -> Self {
        Self {
            titles: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_metadata(&self, external_id: &str, metadata: TitleMetadata) {
        self.titles
            .write()
            .await
            .insert(external_id.to_string(), metadata);
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: MetadataError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every lookup by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Identifiers looked up so far, in call order.
    pub async fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl MetadataClient for MockMetadataClient {
    fn name(&self) -> &str {
        "mock-metadata"
    }

    async fn lookup_by_external_id(&self, external_id: &str) -> Result<TitleMetadata, MetadataError> {
        self.lookups.write().await.push(external_id.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.titles
            .read()
            .await
            .get(external_id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(external_id.to_string()))
    }
}
