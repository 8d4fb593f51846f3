//! Stream resolution pipeline.
//!
//! Ties the pieces together:
//! identifier → descriptor → fallback search → rank/balance → stream records.

mod config;
mod coordinator;
mod error;
mod fallback;

pub use config::{PipelineConfig, MAX_LINK_RESOLVE_LIMIT};
pub use coordinator::{StreamPipeline, StreamResolution, DEFAULT_SOURCE_NAME};
pub use error::ResolveError;
pub use fallback::{first_non_empty, FallbackOutcome};
