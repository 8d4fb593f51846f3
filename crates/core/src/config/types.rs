use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::metadata::OmdbConfig;
use crate::pipeline::PipelineConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub addon: AddonConfig,
    /// OMDb metadata lookups. Without it every id goes through the fallback table.
    #[serde(default)]
    pub metadata: Option<OmdbConfig>,
    pub searcher: SearcherConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    7000
}

/// Addon identity, published in the manifest and used as the stream source label.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,
    #[serde(default = "default_addon_name")]
    pub name: String,
    #[serde(default = "default_addon_version")]
    pub version: String,
    #[serde(default = "default_addon_description")]
    pub description: String,
    /// Image URL shown next to the addon in the host's addon list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            name: default_addon_name(),
            version: default_addon_version(),
            description: default_addon_description(),
            logo: None,
        }
    }
}

fn default_addon_id() -> String {
    "streamfinder.magnet.addon".to_string()
}

fn default_addon_name() -> String {
    "1337x".to_string()
}

fn default_addon_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_addon_description() -> String {
    "Stream torrents via magnet links".to_string()
}

/// Searcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearcherConfig {
    /// Search backend type
    pub backend: SearcherBackend,
    /// Jackett-specific configuration (required when backend = "jackett")
    #[serde(default)]
    pub jackett: Option<JackettConfig>,
}

/// Available search backends
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearcherBackend {
    Jackett,
}

/// Jackett search backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JackettConfig {
    /// Jackett server URL (e.g., "http://localhost:9117")
    pub url: String,
    /// Jackett API key
    pub api_key: String,
    /// Indexer to query; "all" fans out across every configured indexer
    #[serde(default = "default_indexer")]
    pub indexer: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Maximum results kept per search (default: 20)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_indexer() -> String {
    "all".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_results() -> usize {
    20
}

/// Freshness cache for resolved stream lists
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub addon: AddonConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SanitizedMetadataConfig>,
    pub searcher: SanitizedSearcherConfig,
    pub pipeline: PipelineConfig,
    pub cache: CacheConfig,
}

/// Sanitized metadata config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMetadataConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized searcher config (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSearcherConfig {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackett: Option<SanitizedJackettConfig>,
}

/// Sanitized Jackett config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedJackettConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub indexer: String,
    pub timeout_secs: u32,
    pub max_results: usize,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            addon: config.addon.clone(),
            metadata: config.metadata.as_ref().map(|m| SanitizedMetadataConfig {
                base_url: m.base_url().to_string(),
                api_key_configured: !m.api_key.is_empty(),
                timeout_secs: m.timeout_secs,
            }),
            searcher: SanitizedSearcherConfig {
                backend: match config.searcher.backend {
                    SearcherBackend::Jackett => "jackett".to_string(),
                },
                jackett: config
                    .searcher
                    .jackett
                    .as_ref()
                    .map(|j| SanitizedJackettConfig {
                        url: j.url.clone(),
                        api_key_configured: !j.api_key.is_empty(),
                        indexer: j.indexer.clone(),
                        timeout_secs: j.timeout_secs,
                        max_results: j.max_results,
                    }),
            },
            pipeline: config.pipeline.clone(),
            cache: config.cache.clone(),
        }
    }
}
