//! Candidate ranking and resolution balancing.
//!
//! Everything here is pure: no I/O, no failure modes.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::searcher::Candidate;

/// Default number of streams kept per resolution tier.
pub const DEFAULT_MAX_PER_RESOLUTION: usize = 3;

/// A candidate plus the values derived from it for one ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    /// Link a player can open; `None` when resolution failed.
    pub playable_link: Option<String>,
    /// 1 (unknown/SD) ..= 6 (2160p/4K).
    pub resolution_score: u8,
    /// Parsed size in MB, 0 when unparseable.
    pub size_mb: f64,
}

impl RankedCandidate {
    pub fn new(candidate: Candidate, playable_link: Option<String>) -> Self {
        Self {
            resolution_score: resolution_score(&candidate),
            size_mb: parse_size_mb(&candidate.size_text),
            candidate,
            playable_link,
        }
    }
}

/// Resolution tier from the title and quality tag.
pub fn resolution_score(candidate: &Candidate) -> u8 {
    let title = candidate.title.to_lowercase();
    let quality = candidate.quality.as_str().to_lowercase();

    if title.contains("4k") || title.contains("2160p") || quality.contains("2160p") {
        6
    } else if title.contains("1440p") || quality.contains("1440p") {
        5
    } else if title.contains("1080p") || quality.contains("1080p") || quality.contains("fhd") {
        4
    } else if title.contains("720p") || quality.contains("720p") || quality.contains("hd") {
        3
    } else if title.contains("480p") || quality.contains("480p") {
        2
    } else {
        1
    }
}

/// Parse human-readable size text into megabytes.
///
/// `"1.2 GB"` → 1228.8, `"800 MB"` → 800, a bare number is taken as MB.
pub fn parse_size_mb(size_text: &str) -> f64 {
    let text = size_text.trim();
    let number_end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    let Ok(value) = text[..number_end].parse::<f64>() else {
        return 0.0;
    };

    let unit = text[number_end..].trim_start().to_ascii_lowercase();
    if unit.starts_with("tb") || unit.starts_with("tib") {
        value * 1024.0 * 1024.0
    } else if unit.starts_with("gb") || unit.starts_with("gib") {
        value * 1024.0
    } else if unit.starts_with("kb") || unit.starts_with("kib") {
        value / 1024.0
    } else {
        value
    }
}

/// Sort best-first: resolution, then seeders, then size. Stable, so full ties
/// keep encounter order.
pub fn rank(mut candidates: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    candidates.sort_by(compare);
    candidates
}

fn compare(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.resolution_score
        .cmp(&a.resolution_score)
        .then_with(|| b.candidate.seeders.cmp(&a.candidate.seeders))
        .then_with(|| b.size_mb.total_cmp(&a.size_mb))
}

/// Keep at most `max_per_resolution` candidates per tier, highest tier first.
///
/// Input order within a tier is preserved, so pass ranked input.
pub fn balance(ranked: Vec<RankedCandidate>, max_per_resolution: usize) -> Vec<RankedCandidate> {
    let mut buckets: BTreeMap<u8, Vec<RankedCandidate>> = BTreeMap::new();
    for candidate in ranked {
        let bucket = buckets.entry(candidate.resolution_score).or_default();
        if bucket.len() < max_per_resolution {
            bucket.push(candidate);
        }
    }

    buckets.into_values().rev().flatten().collect()
}
