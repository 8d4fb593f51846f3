//! Short-lived freshness cache for resolved stream lists.
//!
//! Not a persistence layer: entries live in memory, expire after a TTL and
//! the map is unbounded.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::config::CacheConfig;
use crate::searcher::ContentKind;
use crate::stream::StreamRecord;

/// Cache key: the requested content kind plus the raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ContentKind,
    pub id: String,
}

impl CacheKey {
    pub fn new(kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// TTL key-value store for stream lists.
#[async_trait]
pub trait StreamCache: Send + Sync {
    /// Fresh entry for the key, if any.
    async fn get(&self, key: &CacheKey) -> Option<Vec<StreamRecord>>;

    /// Store an entry, replacing any previous one.
    async fn put(&self, key: CacheKey, streams: Vec<StreamRecord>);
}

/// Build the cache described by the config.
pub fn cache_from_config(config: &CacheConfig) -> std::sync::Arc<dyn StreamCache> {
    if config.enabled && config.ttl_secs > 0 {
        std::sync::Arc::new(MemoryCache::new(Duration::from_secs(config.ttl_secs)))
    } else {
        std::sync::Arc::new(NoopCache)
    }
}

struct Entry {
    streams: Vec<StreamRecord>,
    stored_at: Instant,
}

/// In-memory cache. Expired entries are evicted when read.
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, Entry>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StreamCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<Vec<StreamRecord>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.streams.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // expired; re-check under the write lock since a put may have raced us
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|e| e.stored_at.elapsed() >= self.ttl)
        {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: CacheKey, streams: Vec<StreamRecord>) {
        self.entries.write().await.insert(
            key,
            Entry {
                streams,
                stored_at: Instant::now(),
            },
        );
    }
}

/// Cache that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl StreamCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Option<Vec<StreamRecord>> {
        None
    }

    async fn put(&self, _key: CacheKey, _streams: Vec<StreamRecord>) {}
}
