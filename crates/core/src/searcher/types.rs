//! Types for the torrent search system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What kind of content a search is for.
///
/// Search backends use this as a category hint; the query builder uses it to
/// pick a variation strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Movie,
    Episodic,
    SportsEvent,
}

impl ContentKind {
    /// Map an addon content type ("movie", "series", ...) to a kind.
    ///
    /// Anything that is not a series is searched as a movie.
    pub fn from_stream_type(stream_type: &str) -> Self {
        match stream_type.to_ascii_lowercase().as_str() {
            "series" | "tv" | "anime" => ContentKind::Episodic,
            _ => ContentKind::Movie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Episodic => "episodic",
            ContentKind::SportsEvent => "sports_event",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse quality tag attached to each search result by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QualityTag {
    #[serde(rename = "2160p")]
    Uhd2160p,
    #[serde(rename = "1080p")]
    Fhd1080p,
    #[serde(rename = "720p")]
    Hd720p,
    #[serde(rename = "480p")]
    Sd480p,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "cam")]
    Cam,
}

impl QualityTag {
    /// Display form used in stream labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTag::Uhd2160p => "2160p",
            QualityTag::Fhd1080p => "1080p",
            QualityTag::Hd720p => "720p",
            QualityTag::Sd480p => "480p",
            QualityTag::Unknown => "Unknown",
            QualityTag::Cam => "CAM",
        }
    }
}

impl fmt::Display for QualityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw search result as produced by a search backend.
///
/// The pipeline treats candidates as read-only; anything derived from them
/// (scores, parsed sizes, resolved links) lives in separate structures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Release title as listed by the index.
    pub title: String,
    /// Human-readable size ("1.4 GB", "700 MB").
    pub size_text: String,
    pub seeders: u32,
    pub leechers: u32,
    pub quality: QualityTag,
    /// Magnet URI, download URL or details page, depending on the backend.
    pub source_link: String,
}

/// Parameters for one search attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    /// Free-text search query.
    pub query: String,
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

impl SearchRequest {
    /// Create a request with no year/season/episode hints.
    pub fn new(query: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            query: query.into(),
            kind,
            year: None,
            season: None,
            episode: None,
        }
    }
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Trait for torrent search backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Run one search and return the raw candidates, best-effort ordered.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, SearchError>;

    /// Turn a candidate's source link into something a player can open.
    ///
    /// Returns `Ok(None)` when the candidate has no usable link.
    async fn resolve_playable_link(
        &self,
        candidate: &Candidate,
    ) -> Result<Option<String>, SearchError>;
}
