//! Title metadata lookup by external identifier.
//!
//! The pipeline only needs a canonical title, a release year and a coarse
//! kind for an IMDb-style id; `OmdbClient` is the production implementation.

mod omdb;
mod types;

pub use omdb::{OmdbClient, OmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when looking up title metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Identifier unknown to the provider.
    #[error("Title not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for metadata providers.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Look up a title by its external id (e.g. `tt0944947`).
    async fn lookup_by_external_id(&self, external_id: &str)
        -> Result<TitleMetadata, MetadataError>;
}
