//! The stream resolution pipeline.

use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::PipelineConfig;
use super::error::ResolveError;
use super::fallback::first_non_empty;
use crate::cache::{CacheKey, NoopCache, StreamCache};
use crate::metadata::MetadataClient;
use crate::query::{IdentifierResolver, SearchDescriptor, VariationGenerator};
use crate::ranking::{balance, rank, RankedCandidate};
use crate::searcher::{link_priority, Candidate, ContentKind, Searcher};
use crate::stream::{StreamFormatter, StreamRecord};

/// Source name used in stream labels when none is configured.
pub const DEFAULT_SOURCE_NAME: &str = "1337x";

/// Outcome of one resolution, with enough context for logging and metrics.
#[derive(Debug, Clone, Serialize)]
pub struct StreamResolution {
    /// `None` when the streams came from the cache.
    pub descriptor: Option<SearchDescriptor>,
    /// Variation that produced the streams.
    pub matched_query: Option<String>,
    /// Search attempts made.
    pub attempts: usize,
    pub from_cache: bool,
    pub streams: Vec<StreamRecord>,
}

impl StreamResolution {
    fn cached(streams: Vec<StreamRecord>) -> Self {
        Self {
            descriptor: None,
            matched_query: None,
            attempts: 0,
            from_cache: true,
            streams,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// Identifier in, ranked stream records out.
///
/// Never fails: every collaborator failure degrades to the next fallback and
/// the last one is an empty stream list.
pub struct StreamPipeline {
    searcher: Arc<dyn Searcher>,
    metadata: Option<Arc<dyn MetadataClient>>,
    cache: Arc<dyn StreamCache>,
    formatter: StreamFormatter,
    generator: VariationGenerator,
    resolver: IdentifierResolver,
    config: PipelineConfig,
}

impl StreamPipeline {
    pub fn new(searcher: Arc<dyn Searcher>, config: PipelineConfig) -> Self {
        let generator = VariationGenerator::new();
        let resolver = IdentifierResolver::new(None, config.metadata_timeout())
            .with_generator(generator.clone());
        Self {
            searcher,
            metadata: None,
            cache: Arc::new(NoopCache),
            formatter: StreamFormatter::new(DEFAULT_SOURCE_NAME),
            generator,
            resolver,
            config,
        }
    }

    pub fn with_metadata(mut self, metadata: Arc<dyn MetadataClient>) -> Self {
        self.metadata = Some(metadata);
        self.rebuild_resolver();
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn StreamCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.formatter = StreamFormatter::new(source_name);
        self
    }

    /// Pin the variation generator, e.g. to a fixed current year in tests.
    pub fn with_variation_generator(mut self, generator: VariationGenerator) -> Self {
        self.generator = generator;
        self.rebuild_resolver();
        self
    }

    fn rebuild_resolver(&mut self) {
        self.resolver = IdentifierResolver::new(self.metadata.clone(), self.config.metadata_timeout())
            .with_generator(self.generator.clone());
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn searcher_name(&self) -> &str {
        self.searcher.name()
    }

    /// Resolve an identifier into streams.
    pub async fn resolve(&self, kind_hint: ContentKind, id: &str) -> StreamResolution {
        let key = CacheKey::new(kind_hint, id);
        if let Some(streams) = self.cache.get(&key).await {
            debug!(key = %key, count = streams.len(), "Cache hit");
            return StreamResolution::cached(streams);
        }

        let descriptor = self.resolver.resolve(id, kind_hint).await;
        if !descriptor.is_resolvable() {
            return StreamResolution {
                descriptor: Some(descriptor),
                matched_query: None,
                attempts: 0,
                from_cache: false,
                streams: Vec::new(),
            };
        }

        debug!(
            id,
            kind = %descriptor.kind(),
            variations = ?descriptor.variations(),
            "Searching"
        );

        let outcome = first_non_empty(descriptor.variations(), |query| {
            self.attempt(&descriptor, query)
        })
        .await;

        let ranked = balance(rank(outcome.items), self.config.max_per_resolution);
        let streams = self.formatter.format_all(&ranked);

        info!(
            id,
            kind = %descriptor.kind(),
            matched_query = ?outcome.matched_query,
            attempts = outcome.attempts,
            streams = streams.len(),
            "Resolved streams"
        );

        if !streams.is_empty() {
            self.cache.put(key, streams.clone()).await;
        }

        StreamResolution {
            descriptor: Some(descriptor),
            matched_query: outcome.matched_query,
            attempts: outcome.attempts,
            from_cache: false,
            streams,
        }
    }

    /// Shorthand for `resolve(..).streams`.
    pub async fn streams(&self, kind_hint: ContentKind, id: &str) -> Vec<StreamRecord> {
        self.resolve(kind_hint, id).await.streams
    }

    /// One variation: search, then resolve links for the most promising
    /// candidates. Candidates without a playable link are dropped here, so an
    /// attempt whose links all fail counts as empty.
    async fn attempt(
        &self,
        descriptor: &SearchDescriptor,
        query: String,
    ) -> Result<Vec<RankedCandidate>, ResolveError> {
        let request = descriptor.request_for(&query);
        let timeout = self.config.search_timeout();

        let candidates = match tokio::time::timeout(timeout, self.searcher.search(&request)).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                return Err(ResolveError::CollaboratorError {
                    collaborator: self.searcher.name().to_string(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ResolveError::CollaboratorTimeout {
                    collaborator: self.searcher.name().to_string(),
                    timeout,
                })
            }
        };

        let mut candidates: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| match malformed(c) {
                Some(e) => {
                    debug!(error = %e, "Dropping candidate");
                    false
                }
                None => true,
            })
            .collect();
        debug!(query = %query, found = candidates.len(), "Search returned");

        candidates.sort_by_key(|c| std::cmp::Reverse(link_priority(c)));
        candidates.truncate(self.config.link_resolve_limit);

        let resolved = join_all(candidates.into_iter().map(|c| self.resolve_link(c))).await;
        Ok(resolved.into_iter().flatten().collect())
    }

    async fn resolve_link(&self, candidate: Candidate) -> Option<RankedCandidate> {
        let timeout = self.config.link_timeout();
        let result =
            tokio::time::timeout(timeout, self.searcher.resolve_playable_link(&candidate)).await;

        match result {
            Ok(Ok(Some(link))) if !link.trim().is_empty() => {
                Some(RankedCandidate::new(candidate, Some(link)))
            }
            Ok(Ok(_)) => {
                debug!(title = %candidate.title, "No playable link");
                None
            }
            Ok(Err(e)) => {
                let e = ResolveError::CollaboratorError {
                    collaborator: self.searcher.name().to_string(),
                    message: e.to_string(),
                };
                warn!(title = %candidate.title, error = %e, "Link resolution failed");
                None
            }
            Err(_) => {
                let e = ResolveError::CollaboratorTimeout {
                    collaborator: self.searcher.name().to_string(),
                    timeout,
                };
                warn!(title = %candidate.title, error = %e, "Link resolution timed out");
                None
            }
        }
    }
}

fn malformed(candidate: &Candidate) -> Option<ResolveError> {
    if candidate.title.trim().is_empty() {
        Some(ResolveError::MalformedCandidate(format!(
            "blank title (link {})",
            candidate.source_link
        )))
    } else if candidate.source_link.trim().is_empty() {
        Some(ResolveError::MalformedCandidate(format!(
            "no source link for {}",
            candidate.title
        )))
    } else {
        None
    }
}
