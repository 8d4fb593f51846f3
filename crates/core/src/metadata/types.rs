use serde::{Deserialize, Serialize};

/// Coarse title kind reported by the metadata provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Movie,
    Series,
    Episode,
    Other,
}

impl MetadataKind {
    /// Parse the provider's `Type` field. Unknown values map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => MetadataKind::Movie,
            "series" => MetadataKind::Series,
            "episode" => MetadataKind::Episode,
            _ => MetadataKind::Other,
        }
    }
}

/// Metadata for one title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    pub kind: MetadataKind,
}

impl TitleMetadata {
    pub fn new(title: impl Into<String>, year: Option<u32>, kind: MetadataKind) -> Self {
        Self {
            title: title.into(),
            year,
            kind,
        }
    }
}

/// Parse a release year from provider text.
///
/// Series years come as ranges ("2011–2019", "2020–"); only the leading four
/// digits count. Returns `None` for "N/A" and anything else without them.
pub fn parse_year(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}
