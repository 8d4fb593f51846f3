//! Resolution lifecycle integration tests.
//!
//! These tests drive the public pipeline end-to-end with mock collaborators:
//! identifier -> descriptor -> fallback search -> rank/balance -> stream records

use std::sync::Arc;
use std::time::Duration;

use streamfinder_core::{
    metadata::MetadataError,
    query::VariationGenerator,
    searcher::SearchError,
    testing::{fixtures, MockMetadataClient, MockSearcher},
    ContentKind, MemoryCache, MetadataClient, PipelineConfig, StreamCache, StreamPipeline,
};

/// Test helper wiring mocks into a pipeline.
struct TestHarness {
    searcher: Arc<MockSearcher>,
    metadata: Arc<MockMetadataClient>,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            searcher: Arc::new(MockSearcher::new()),
            metadata: Arc::new(MockMetadataClient::new()),
        }
    }

    fn pipeline(&self) -> StreamPipeline {
        self.pipeline_with(PipelineConfig::default())
    }

    fn pipeline_with(&self, config: PipelineConfig) -> StreamPipeline {
        StreamPipeline::new(self.searcher.clone(), config)
            .with_metadata(self.metadata.clone() as Arc<dyn MetadataClient>)
            .with_variation_generator(VariationGenerator::with_current_year(2025))
    }
}

#[tokio::test]
async fn test_series_episode_end_to_end() {
    let harness = TestHarness::new();
    harness
        .metadata
        .set_metadata("tt0944947", fixtures::series_metadata("Game of Thrones", 2011))
        .await;

    let mut results = vec![fixtures::candidate(
        "Game.of.Thrones.S01E01.720p.HDTV",
        500,
        "350 MB",
    )];
    for i in 0..5 {
        results.push(fixtures::candidate(
            &format!("Game.of.Thrones.S01E01.1080p.WEB.GRP{}", i),
            100 - i,
            "1.8 GB",
        ));
    }
    results.push(fixtures::candidate(
        "Game.of.Thrones.S01E01.2160p.UHD.BluRay",
        10,
        "9.1 GB",
    ));
    harness
        .searcher
        .set_results("Game of Thrones S01E01", results)
        .await;

    let resolution = harness
        .pipeline()
        .resolve(ContentKind::Episodic, "tt0944947:1:1")
        .await;

    let descriptor = resolution.descriptor.as_ref().unwrap();
    assert_eq!(descriptor.primary_query(), "Game of Thrones S01E01");
    assert_eq!(resolution.matched_query.as_deref(), Some("Game of Thrones S01E01"));
    assert_eq!(resolution.attempts, 1);

    let labels: Vec<_> = resolution.streams.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "1337x\n4K",
            "1337x\n1080p",
            "1337x\n1080p",
            "1337x\n1080p",
            "1337x\n720p"
        ]
    );
    assert!(resolution.streams[1].display_title.contains("GRP0"));
    assert!(resolution.streams[3].display_title.contains("GRP2"));
    assert!(resolution
        .streams
        .iter()
        .all(|s| s.playable_link.starts_with("magnet:?xt=urn:btih:")));
}

#[tokio::test]
async fn test_sports_event_numeral_fallback() {
    let harness = TestHarness::new();
    harness
        .searcher
        .set_results(
            "WWE WrestleMania XL",
            vec![fixtures::candidate(
                "WWE.WrestleMania.XL.Night.1.1080p.WEB.h264",
                80,
                "6.2 GB",
            )],
        )
        .await;

    let resolution = harness
        .pipeline()
        .resolve(ContentKind::Movie, "search:WWE.WrestleMania.40:2024")
        .await;

    let descriptor = resolution.descriptor.as_ref().unwrap();
    assert_eq!(descriptor.kind(), ContentKind::SportsEvent);
    assert_eq!(descriptor.primary_query(), "WWE WrestleMania 2024");
    assert!(descriptor.variations().iter().any(|v| v == "WWE WrestleMania 40"));

    assert_eq!(resolution.matched_query.as_deref(), Some("WWE WrestleMania XL"));
    assert_eq!(resolution.streams.len(), 1);

    // every earlier variation was tried first, in order
    let queries = harness.searcher.recorded_queries().await;
    assert_eq!(queries.first().map(String::as_str), Some("WWE WrestleMania 2024"));
    assert_eq!(queries.last().map(String::as_str), Some("WWE WrestleMania XL"));
}

#[tokio::test]
async fn test_unresolvable_identifier_is_empty() {
    let harness = TestHarness::new();

    let resolution = harness
        .pipeline()
        .resolve(ContentKind::Movie, "tt9999999999")
        .await;

    assert!(resolution.is_empty());
    assert_eq!(resolution.descriptor.unwrap().primary_query(), "");
    assert_eq!(harness.searcher.search_count().await, 0);
    assert_eq!(harness.metadata.recorded_lookups().await, vec!["tt9999999999"]);
}

#[tokio::test]
async fn test_metadata_failure_uses_fallback_table() {
    let harness = TestHarness::new();
    harness
        .metadata
        .set_next_error(MetadataError::RateLimitExceeded)
        .await;
    harness
        .searcher
        .set_results(
            "John Wick 2014",
            vec![fixtures::candidate("John.Wick.2014.1080p.BluRay.x264", 300, "2.1 GB")],
        )
        .await;

    let streams = harness
        .pipeline()
        .streams(ContentKind::Movie, "tt2911666")
        .await;

    assert_eq!(streams.len(), 1);
    assert_eq!(harness.searcher.recorded_queries().await, vec!["John Wick 2014"]);
}

#[tokio::test]
async fn test_size_breaks_ties() {
    let harness = TestHarness::new();
    harness
        .metadata
        .set_metadata("tt1375666", fixtures::movie_metadata("Inception", 2010))
        .await;
    harness
        .searcher
        .set_results(
            "Inception 2010",
            vec![
                fixtures::candidate("Inception 2010 1080p Small", 40, "800 MB"),
                fixtures::candidate("Inception 2010 1080p Large", 40, "1.2 GB"),
            ],
        )
        .await;

    let streams = harness
        .pipeline()
        .streams(ContentKind::Movie, "tt1375666")
        .await;

    assert_eq!(streams.len(), 2);
    assert!(streams[0].display_title.starts_with("Inception 2010 1080p Large"));
    assert!(streams[1].display_title.starts_with("Inception 2010 1080p Small"));
}

#[tokio::test]
async fn test_resolution_is_deterministic() {
    let harness = TestHarness::new();
    let results: Vec<_> = (0..8)
        .map(|i| {
            let quality = ["2160p", "1080p", "720p", "480p"][i % 4];
            fixtures::candidate(&format!("Heat 1995 {} R{}", quality, i), 10, "1 GB")
        })
        .collect();
    harness.searcher.set_results("Heat", results).await;

    let pipeline = harness.pipeline();
    let first = pipeline.streams(ContentKind::Movie, "search:Heat").await;
    let second = pipeline.streams(ContentKind::Movie, "search:Heat").await;

    assert_eq!(first.len(), 8);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_collaborator_failures_never_propagate() {
    let harness = TestHarness::new();
    harness
        .metadata
        .set_next_error(MetadataError::ApiError {
            status: 500,
            message: "boom".to_string(),
        })
        .await;
    harness
        .searcher
        .set_next_error(SearchError::ConnectionFailed("refused".to_string()))
        .await;

    let resolution = harness
        .pipeline()
        .resolve(ContentKind::Episodic, "tt0903747:1:1")
        .await;

    // fallback table still produced queries; the failed first attempt was skipped
    let descriptor = resolution.descriptor.as_ref().unwrap();
    assert_eq!(descriptor.primary_query(), "Breaking Bad S01E01");
    assert!(resolution.attempts > 1);
    assert!(resolution.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cache_freshness() {
    let harness = TestHarness::new();
    harness
        .searcher
        .set_results("Dune", vec![fixtures::candidate("Dune 2160p", 3, "40 GB")])
        .await;

    let cache = Arc::new(MemoryCache::new(Duration::from_secs(60)));
    let pipeline = harness
        .pipeline()
        .with_cache(cache.clone() as Arc<dyn StreamCache>);

    let first = pipeline.resolve(ContentKind::Movie, "search:Dune").await;
    assert!(!first.from_cache);

    let second = pipeline.resolve(ContentKind::Movie, "search:Dune").await;
    assert!(second.from_cache);
    assert_eq!(second.streams, first.streams);
    assert_eq!(harness.searcher.search_count().await, 1);

    // same id, different kind: separate entry
    let other_kind = pipeline.resolve(ContentKind::Episodic, "search:Dune").await;
    assert!(!other_kind.from_cache);
    assert_eq!(cache.len().await, 2);

    tokio::time::advance(Duration::from_secs(61)).await;
    let third = pipeline.resolve(ContentKind::Movie, "search:Dune").await;
    assert!(!third.from_cache);
}

#[tokio::test]
async fn test_unresolvable_links_fall_through_to_next_variation() {
    let harness = TestHarness::new();
    let dead = fixtures::page_candidate("The Office S02E05 720p", 90, "300 MB");
    harness.searcher.set_link(&dead.source_link, None).await;
    harness
        .searcher
        .set_results("The Office S02E05", vec![dead])
        .await;
    harness
        .searcher
        .set_results(
            "The.Office S02E05",
            vec![fixtures::candidate("The.Office.S02E05.480p", 12, "150 MB")],
        )
        .await;

    let resolution = harness
        .pipeline()
        .resolve(ContentKind::Episodic, "search:The.Office:s02:e05")
        .await;

    assert_eq!(resolution.matched_query.as_deref(), Some("The.Office S02E05"));
    assert_eq!(resolution.streams.len(), 1);
    assert_eq!(resolution.streams[0].label, "1337x\n480p");
}
