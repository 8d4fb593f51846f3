//! Jackett search backend implementation.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::{redirect, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::JackettConfig;

use super::quality::extract_quality;
use super::{Candidate, ContentKind, SearchError, SearchRequest, Searcher};

/// First magnet link embedded in a details page.
static MAGNET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"magnet:\?xt=urn:btih:[^"'\s<>]+"#).unwrap());

/// Jackett search backend implementation.
pub struct JackettSearcher {
    client: Client,
    config: JackettConfig,
}

impl JackettSearcher {
    /// Create a new JackettSearcher with the given configuration.
    ///
    /// Redirects are not followed: indexer download links often answer with
    /// a `Location: magnet:...` header that reqwest cannot follow anyway.
    pub fn new(config: JackettConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| SearchError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build the Jackett API URL for a search.
    fn build_search_url(&self, request: &SearchRequest) -> String {
        let mut url = format!(
            "{}/api/v2.0/indexers/{}/results?apikey={}&Query={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(&self.config.indexer),
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&request.query)
        );

        for cat_id in kind_to_jackett_ids(request.kind) {
            url.push_str(&format!("&Category[]={}", cat_id));
        }

        url
    }
}

#[async_trait]
impl Searcher for JackettSearcher {
    fn name(&self) -> &str {
        "jackett"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, SearchError> {
        let url = self.build_search_url(request);
        debug!(indexer = %self.config.indexer, query = %request.query, "Searching Jackett");

        let response = self.client.get(&url).send().await.map_err(map_request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let jackett_response: JackettResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ApiError(format!("Failed to parse response: {}", e)))?;

        debug!(
            results = jackett_response.Results.len(),
            "Jackett search complete"
        );

        Ok(jackett_response
            .Results
            .into_iter()
            .filter_map(JackettResult::into_candidate)
            .take(self.config.max_results)
            .collect())
    }

    async fn resolve_playable_link(
        &self,
        candidate: &Candidate,
    ) -> Result<Option<String>, SearchError> {
        let link = candidate.source_link.as_str();
        if link.starts_with("magnet:") {
            return Ok(Some(link.to_string()));
        }
        if !(link.starts_with("http://") || link.starts_with("https://")) {
            return Ok(None);
        }

        let response = self.client.get(link).send().await.map_err(map_request_error)?;
        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .filter(|v| v.starts_with("magnet:"))
                .map(str::to_string);
            return Ok(location);
        }

        if !status.is_success() {
            debug!(%status, title = %candidate.title, "Link resolution returned non-success");
            return Ok(None);
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("text/html"));
        if !is_html {
            // a .torrent payload; only magnet links are playable
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ApiError(format!("Failed to read details page: {}", e)))?;
        Ok(find_magnet(&body))
    }
}

fn map_request_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else if e.is_connect() {
        SearchError::ConnectionFailed(e.to_string())
    } else {
        SearchError::ApiError(e.to_string())
    }
}

/// Map content kinds to Jackett category IDs.
///
/// Sports events are spread across TV and "Other" depending on the indexer,
/// so they search uncategorized.
fn kind_to_jackett_ids(kind: ContentKind) -> Vec<i32> {
    match kind {
        ContentKind::Movie => vec![2000],
        ContentKind::Episodic => vec![5000],
        ContentKind::SportsEvent => vec![],
    }
}

/// Find the first magnet link in an HTML page.
fn find_magnet(html: &str) -> Option<String> {
    MAGNET_RE
        .find(html)
        .map(|m| m.as_str().replace("&amp;", "&"))
}

/// Render a byte count the way index sites display sizes ("1.40 GB").
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let b = bytes as f64;
    if b >= TB {
        format!("{:.2} TB", b / TB)
    } else if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else {
        format!("{:.2} KB", b / KB)
    }
}

// Jackett API response types
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct JackettResponse {
    Results: Vec<JackettResult>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct JackettResult {
    Title: String,
    MagnetUri: Option<String>,
    Link: Option<String>,
    Details: Option<String>,
    Size: Option<i64>,
    Seeders: Option<i32>,
    Peers: Option<i32>,
}

impl JackettResult {
    /// Results without a title or any link are useless downstream.
    fn into_candidate(self) -> Option<Candidate> {
        let title = self.Title.trim().to_string();
        if title.is_empty() {
            return None;
        }

        let source_link = self
            .MagnetUri
            .filter(|s| !s.is_empty())
            .or(self.Link.filter(|s| !s.is_empty()))
            .or(self.Details.filter(|s| !s.is_empty()))?;

        let seeders = self.Seeders.unwrap_or(0).max(0);
        let leechers = self.Peers.unwrap_or(0).saturating_sub(seeders).max(0);

        Some(Candidate {
            quality: extract_quality(&title),
            title,
            size_text: format_size(self.Size.unwrap_or(0).max(0) as u64),
            seeders: seeders as u32,
            leechers: leechers as u32,
            source_link,
        })
    }
}
