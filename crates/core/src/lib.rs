pub mod cache;
pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod query;
pub mod ranking;
pub mod searcher;
pub mod stream;
pub mod testing;

pub use cache::{cache_from_config, CacheKey, MemoryCache, NoopCache, StreamCache};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use metadata::{MetadataClient, MetadataError, OmdbClient, TitleMetadata};
pub use pipeline::{PipelineConfig, ResolveError, StreamPipeline, StreamResolution};
pub use query::{generate_variations, normalize, IdentifierResolver, SearchDescriptor};
pub use ranking::{balance, rank, RankedCandidate};
pub use searcher::{Candidate, ContentKind, JackettSearcher, QualityTag, SearchError, Searcher};
pub use stream::{StreamFormatter, StreamRecord};
