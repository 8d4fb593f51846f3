use std::time::Duration;
use thiserror::Error;

/// Failures inside the pipeline.
///
/// None of these reach the caller of `StreamPipeline::resolve`: each one is
/// logged and turned into an empty result or the next fallback.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("identifier could not be resolved to a search query: {0}")]
    UnresolvableIdentifier(String),

    #[error("{collaborator} did not answer within {timeout:?}")]
    CollaboratorTimeout {
        collaborator: String,
        timeout: Duration,
    },

    #[error("{collaborator} failed: {message}")]
    CollaboratorError {
        collaborator: String,
        message: String,
    },

    #[error("malformed candidate: {0}")]
    MalformedCandidate(String),
}
