use super::{types::Config, ConfigError, SearcherBackend};
use crate::pipeline::MAX_LINK_RESOLVE_LIMIT;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - The selected search backend has its section and a URL
/// - Pipeline limits and timeouts are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    match config.searcher.backend {
        SearcherBackend::Jackett => match &config.searcher.jackett {
            Some(jackett) if jackett.url.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "searcher.jackett.url cannot be empty".to_string(),
                ));
            }
            Some(jackett) if jackett.timeout_secs == 0 => {
                return Err(ConfigError::ValidationError(
                    "searcher.jackett.timeout_secs cannot be 0".to_string(),
                ));
            }
            Some(_) => {}
            None => {
                return Err(ConfigError::ValidationError(
                    "searcher.backend is \"jackett\" but [searcher.jackett] is missing".to_string(),
                ));
            }
        },
    }

    let pipeline = &config.pipeline;
    if pipeline.max_per_resolution == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_per_resolution cannot be 0".to_string(),
        ));
    }
    if pipeline.link_resolve_limit == 0 || pipeline.link_resolve_limit > MAX_LINK_RESOLVE_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "pipeline.link_resolve_limit must be between 1 and {}",
            MAX_LINK_RESOLVE_LIMIT
        )));
    }
    if pipeline.search_timeout_secs == 0
        || pipeline.link_timeout_secs == 0
        || pipeline.metadata_timeout_secs == 0
    {
        return Err(ConfigError::ValidationError(
            "pipeline timeouts cannot be 0".to_string(),
        ));
    }
    if let Some(metadata) = &config.metadata {
        if metadata.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "metadata.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
