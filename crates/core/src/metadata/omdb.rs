//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key. It answers HTTP 200 for lookup misses and
//! reports them through `Response: "False"` in the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{parse_year, MetadataKind, TitleMetadata};
use super::{MetadataClient, MetadataError};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    10
}

impl OmdbConfig {
    /// Effective base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Check the API key against a well-known title.
    pub async fn validate_api_key(&self) -> Result<(), MetadataError> {
        self.lookup_by_external_id("tt0111161").await.map(|_| ())
    }
}

#[async_trait]
impl MetadataClient for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn lookup_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<TitleMetadata, MetadataError> {
        let url = format!("{}/", self.base_url);

        debug!("OMDb lookup: id={}", external_id);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("i", external_id)])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(MetadataError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if status == 429 {
            return Err(MetadataError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: OmdbTitleResponse = response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse title response: {}", e))
        })?;

        body.into_metadata(external_id)
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbTitleResponse {
    response: String,
    title: Option<String>,
    year: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    error: Option<String>,
}

impl OmdbTitleResponse {
    fn into_metadata(self, external_id: &str) -> Result<TitleMetadata, MetadataError> {
        if !self.response.eq_ignore_ascii_case("true") {
            let message = self.error.unwrap_or_default();
            if message.to_ascii_lowercase().contains("api key") {
                return Err(MetadataError::NotConfigured(message));
            }
            return Err(MetadataError::NotFound(format!("{} ({})", external_id, message)));
        }

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MetadataError::ParseError("response has no title".to_string()))?;

        Ok(TitleMetadata {
            title,
            year: self.year.as_deref().and_then(parse_year),
            kind: self
                .kind
                .as_deref()
                .map(MetadataKind::parse)
                .unwrap_or(MetadataKind::Other),
        })
    }
}
