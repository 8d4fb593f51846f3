//! Torrent search abstraction.
//!
//! This module provides a `Searcher` trait for querying a torrent index and
//! turning its listings into playable links, plus the Jackett backend.

mod jackett;
mod quality;
mod types;

pub use jackett::JackettSearcher;
pub use quality::{extract_quality, link_priority};
pub use types::*;
