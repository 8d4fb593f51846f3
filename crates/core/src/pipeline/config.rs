//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ranking::DEFAULT_MAX_PER_RESOLUTION;

/// Upper bound for `link_resolve_limit`.
pub const MAX_LINK_RESOLVE_LIMIT: usize = 10;

/// Tuning for the resolution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Streams kept per resolution tier after ranking.
    #[serde(default = "default_max_per_resolution")]
    pub max_per_resolution: usize,

    /// How many candidates of one attempt get their playable link resolved.
    #[serde(default = "default_link_resolve_limit")]
    pub link_resolve_limit: usize,

    /// Timeout for one searcher call (seconds).
    #[serde(default = "default_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Timeout for one link resolution (seconds).
    #[serde(default = "default_timeout_secs")]
    pub link_timeout_secs: u64,

    /// Timeout for one metadata lookup (seconds).
    #[serde(default = "default_timeout_secs")]
    pub metadata_timeout_secs: u64,
}

fn default_max_per_resolution() -> usize {
    DEFAULT_MAX_PER_RESOLUTION
}

fn default_link_resolve_limit() -> usize {
    MAX_LINK_RESOLVE_LIMIT
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_per_resolution: default_max_per_resolution(),
            link_resolve_limit: default_link_resolve_limit(),
            search_timeout_secs: default_timeout_secs(),
            link_timeout_secs: default_timeout_secs(),
            metadata_timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn link_timeout(&self) -> Duration {
        Duration::from_secs(self.link_timeout_secs)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }
}
