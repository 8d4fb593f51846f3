//! Quality heuristics applied to raw index listings.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::{Candidate, QualityTag};

/// Whole-word markers of theatre recordings.
static CAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(cam|hdcam|camrip|ts|hdts|tc|telesync|telecine)\b").unwrap());

/// Derive a coarse quality tag from a release title.
pub fn extract_quality(title: &str) -> QualityTag {
    let upper = title.to_uppercase();

    if upper.contains("2160P") || upper.contains("4K") {
        QualityTag::Uhd2160p
    } else if upper.contains("1080P") {
        QualityTag::Fhd1080p
    } else if upper.contains("720P") {
        QualityTag::Hd720p
    } else if upper.contains("480P") {
        QualityTag::Sd480p
    } else if CAM_RE.is_match(title) {
        // before the bare "HD" check so HDCAM/HDTS stay cams
        QualityTag::Cam
    } else if upper.contains("HDTV") || upper.contains("HD") {
        QualityTag::Hd720p
    } else {
        QualityTag::Unknown
    }
}

/// Bonus added to the link-resolution priority for each quality tag.
fn quality_bonus(quality: QualityTag) -> i64 {
    match quality {
        QualityTag::Uhd2160p => 1000,
        QualityTag::Fhd1080p => 500,
        QualityTag::Hd720p => 200,
        QualityTag::Sd480p => 100,
        QualityTag::Cam => -500,
        QualityTag::Unknown => 0,
    }
}

/// Priority used to choose which candidates get their links resolved.
///
/// Link resolution is the expensive step, so only the top few candidates by
/// this score are resolved before the real ranking runs.
pub fn link_priority(candidate: &Candidate) -> i64 {
    candidate.seeders as i64 * 2 + candidate.leechers as i64 + quality_bonus(candidate.quality)
}
