//! Testing utilities and mock implementations.
//!
//! Mocks for the two collaborator traits, so the pipeline can be exercised
//! end-to-end without a live index or metadata service.
//!
//! # Example
//!
//! ```rust,ignore
//! use streamfinder_core::testing::{fixtures, MockMetadataClient, MockSearcher};
//!
//! let searcher = MockSearcher::new();
//! let metadata = MockMetadataClient::new();
//!
//! metadata.set_metadata("tt0944947", fixtures::series_metadata("Game of Thrones", 2011)).await;
//! searcher
//!     .set_results("Game of Thrones S01E01", vec![fixtures::candidate("GoT S01E01 1080p", 40, "2 GB")])
//!     .await;
//! ```

mod mock_metadata;
mod mock_searcher;

pub use mock_metadata::MockMetadataClient;
pub use mock_searcher::{MockSearcher, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::metadata::{MetadataKind, TitleMetadata};
    use crate::searcher::{extract_quality, Candidate};

    /// Create a candidate with a magnet source link derived from the title.
    ///
    /// The quality tag is extracted from the title the way a backend would.
    pub fn candidate(title: &str, seeders: u32, size_text: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            size_text: size_text.to_string(),
            seeders,
            leechers: seeders / 4,
            quality: extract_quality(title),
            source_link: format!("magnet:?xt=urn:btih:{}", info_hash(title)),
        }
    }

    /// Create a candidate whose source link is a details page.
    pub fn page_candidate(title: &str, seeders: u32, size_text: &str) -> Candidate {
        let mut candidate = candidate(title, seeders, size_text);
        candidate.source_link = format!("https://index.example/torrent/{}", info_hash(title));
        candidate
    }

    pub fn movie_metadata(title: &str, year: u32) -> TitleMetadata {
        TitleMetadata::new(title, Some(year), MetadataKind::Movie)
    }

    pub fn series_metadata(title: &str, year: u32) -> TitleMetadata {
        TitleMetadata::new(title, Some(year), MetadataKind::Series)
    }

    /// Stable fake info hash: 40 hex chars derived from the title bytes.
    fn info_hash(title: &str) -> String {
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for b in title.bytes() {
            state ^= u64::from(b);
            state = state.wrapping_mul(0x0100_0000_01b3);
        }
        format!("{:016x}{:016x}{:08x}", state, state.rotate_left(17), state as u32)
    }
}
