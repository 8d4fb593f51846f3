use std::sync::Arc;
use streamfinder_core::{config::AddonConfig, Config, SanitizedConfig, StreamPipeline};

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: Arc<StreamPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: Arc<StreamPipeline>) -> Self {
        Self { config, pipeline }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn addon(&self) -> &AddonConfig {
        &self.config.addon
    }

    pub fn pipeline(&self) -> &StreamPipeline {
        self.pipeline.as_ref()
    }
}
