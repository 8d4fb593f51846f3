//! Stream records as returned to the addon host.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::ranking::RankedCandidate;
use crate::searcher::QualityTag;

static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());
static HDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hdr[0-9+]*|dv|dovi)\b|dolby\s*vision").unwrap());
/// Digits glued after a size unit by sloppy scraping ("1.4 GB123").
static SIZE_TRAILER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?\s*(?:GB|MB|KB|TB))\d+$").unwrap());

/// One playable stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Left column: source name and quality badge.
    #[serde(rename = "name")]
    pub label: String,
    /// Right column: cleaned title plus size/seeder line.
    #[serde(rename = "title")]
    pub display_title: String,
    #[serde(rename = "url")]
    pub playable_link: String,
    #[serde(rename = "behaviorHints")]
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorHints {
    #[serde(rename = "bingeGroup")]
    pub binge_group: String,
}

/// Maps ranked candidates to stream records.
#[derive(Debug, Clone)]
pub struct StreamFormatter {
    source_name: String,
    binge_group: String,
}

impl StreamFormatter {
    pub fn new(source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        let binge_group = format!(
            "{}-magnet-addon",
            source_name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
        );
        Self {
            source_name,
            binge_group,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// `None` when the candidate has no playable link.
    pub fn format(&self, ranked: &RankedCandidate) -> Option<StreamRecord> {
        let link = ranked.playable_link.as_deref().filter(|l| !l.is_empty())?;
        let candidate = &ranked.candidate;

        Some(StreamRecord {
            label: format!(
                "{}\n{}",
                self.source_name,
                quality_badge(&candidate.title, candidate.quality)
            ),
            display_title: format!(
                "{}\n💾 {} 🌱 {}",
                clean_title(&candidate.title),
                clean_size(&candidate.size_text),
                candidate.seeders
            ),
            playable_link: link.to_string(),
            behavior_hints: BehaviorHints {
                binge_group: self.binge_group.clone(),
            },
        })
    }

    pub fn format_all(&self, ranked: &[RankedCandidate]) -> Vec<StreamRecord> {
        ranked.iter().filter_map(|r| self.format(r)).collect()
    }
}

/// "4K HDR ATMOS REMUX" subset, or the raw quality tag when none apply.
pub fn quality_badge(title: &str, quality: QualityTag) -> String {
    let lower = title.to_lowercase();
    let mut badges = Vec::new();

    if quality == QualityTag::Uhd2160p || lower.contains("4k") {
        badges.push("4K");
    }
    if HDR_RE.is_match(title) {
        badges.push("HDR");
    }
    if lower.contains("atmos") {
        badges.push("ATMOS");
    }
    if lower.contains("remux") {
        badges.push("REMUX");
    }

    if badges.is_empty() {
        quality.to_string()
    } else {
        badges.join(" ")
    }
}

/// Strip `[group]` and `(noise)` segments and normalize whitespace.
pub fn clean_title(title: &str) -> String {
    let cleaned = BRACKETED_RE.replace_all(title, " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        title.trim().to_string()
    } else {
        cleaned
    }
}

pub fn clean_size(size_text: &str) -> String {
    let trimmed = size_text.trim();
    SIZE_TRAILER_RE.replace(trimmed, "$1").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::{extract_quality, Candidate};

    fn ranked(title: &str, link: Option<&str>) -> RankedCandidate {
        RankedCandidate::new(
            Candidate {
                title: title.to_string(),
                size_text: "1.4 GB".to_string(),
                seeders: 120,
                leechers: 4,
                quality: extract_quality(title),
                source_link: "https://index/details/1".to_string(),
            },
            link.map(str::to_string),
        )
    }

    #[test]
    fn test_format_record() {
        let formatter = StreamFormatter::new("1337x");
        let record = formatter
            .format(&ranked(
                "[YTS] John Wick (2014) 1080p BluRay",
                Some("magnet:?xt=urn:btih:abc"),
            ))
            .unwrap();

        assert_eq!(record.label, "1337x\n1080p");
        assert_eq!(record.display_title, "John Wick 1080p BluRay\n💾 1.4 GB 🌱 120");
        assert_eq!(record.playable_link, "magnet:?xt=urn:btih:abc");
        assert_eq!(record.behavior_hints.binge_group, "1337x-magnet-addon");
    }

    #[test]
    fn test_format_drops_missing_link() {
        let formatter = StreamFormatter::new("1337x");
        assert!(formatter.format(&ranked("Movie 720p", None)).is_none());
        assert!(formatter.format(&ranked("Movie 720p", Some(""))).is_none());
    }

    #[test]
    fn test_quality_badge() {
        assert_eq!(
            quality_badge("Dune 2021 2160p UHD BluRay REMUX HDR DTS-HD Atmos", QualityTag::Uhd2160p),
            "4K HDR ATMOS REMUX"
        );
        assert_eq!(quality_badge("Show S01E01 DV 1080p", QualityTag::Fhd1080p), "HDR");
        // "dvd" is not Dolby Vision
        assert_eq!(quality_badge("Old Movie DVDRip", QualityTag::Unknown), "Unknown");
        assert_eq!(quality_badge("New Movie HDCAM", QualityTag::Cam), "CAM");
    }

    #[test]
    fn test_clean_size() {
        assert_eq!(clean_size("1.4 GB123"), "1.4 GB");
        assert_eq!(clean_size(" 700 MB "), "700 MB");
        assert_eq!(clean_size("2.1GB5"), "2.1GB");
    }

    #[test]
    fn test_clean_title_keeps_something() {
        assert_eq!(clean_title("[Group]"), "[Group]");
        assert_eq!(clean_title("A   (2014)  B"), "A B");
    }

    #[test]
    fn test_serialized_shape() {
        let formatter = StreamFormatter::new("1337x");
        let record = formatter
            .format(&ranked("Movie 720p", Some("magnet:?xt=urn:btih:abc")))
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "1337x\n720p");
        assert_eq!(json["url"], "magnet:?xt=urn:btih:abc");
        assert_eq!(json["behaviorHints"]["bingeGroup"], "1337x-magnet-addon");
    }
}
