use serde::Serialize;

use super::variations::dedupe;
use crate::searcher::{ContentKind, SearchRequest};

/// Everything the search loop needs to know about one request.
///
/// `primary_query` is always `variations[0]`, or empty when there are no
/// variations. An empty descriptor means the identifier could not be turned
/// into a query at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDescriptor {
    primary_query: String,
    variations: Vec<String>,
    kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episode: Option<u32>,
}

impl SearchDescriptor {
    pub fn new(
        variations: Vec<String>,
        kind: ContentKind,
        year: Option<u32>,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Self {
        let variations = dedupe(variations);
        Self {
            primary_query: variations.first().cloned().unwrap_or_default(),
            variations,
            kind,
            year,
            season,
            episode,
        }
    }

    /// A descriptor with no query.
    pub fn empty(kind: ContentKind) -> Self {
        Self::new(Vec::new(), kind, None, None, None)
    }

    pub fn primary_query(&self) -> &str {
        &self.primary_query
    }

    pub fn variations(&self) -> &[String] {
        &self.variations
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    pub fn season(&self) -> Option<u32> {
        self.season
    }

    pub fn episode(&self) -> Option<u32> {
        self.episode
    }

    pub fn is_resolvable(&self) -> bool {
        !self.primary_query.is_empty()
    }

    /// Search request for one of this descriptor's variations.
    pub fn request_for(&self, query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            kind: self.kind,
            year: self.year,
            season: self.season,
            episode: self.episode,
        }
    }
}
