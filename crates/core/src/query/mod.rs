//! Query building: identifier resolution, normalization and search variations.

mod descriptor;
mod fallback_titles;
mod normalize;
mod patterns;
mod resolver;
mod variations;

pub use descriptor::SearchDescriptor;
pub use fallback_titles::{lookup_fallback_title, FallbackTitle};
pub use normalize::{normalize, normalize_without_year, parse_year_token};
pub use patterns::{
    find_numeral, from_roman, has_sports_keyword, is_likely_anime, is_sports_title, match_event,
    to_roman, EventRule,
};
pub use resolver::{IdentifierResolver, IdentifierShape};
pub use variations::{episode_token, generate_variations, VariationGenerator};
