//! Search string cleanup.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Embedded IMDb-style identifiers ("tt0944947").
static ID_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btt\d+\b").unwrap());

/// Clean a raw title or identifier fragment into a search string.
///
/// Separators (`.`, `_`, `-` and friends) become spaces. Apostrophes and `&`
/// are part of many titles and survive; other punctuation is dropped.
/// Embedded identifier tokens are removed and whitespace is collapsed.
/// Letters outside ASCII are kept. Returns an empty string when nothing
/// usable is left.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '.' | '_' | '-' | '/' | ':' | '|' | '+' => Some(' '),
            '\'' | '\u{2019}' => Some('\''),
            '&' => Some('&'),
            c if c.is_alphanumeric() || c.is_whitespace() => Some(c),
            _ => None,
        })
        .collect();

    let without_ids = ID_TOKEN_RE.replace_all(&cleaned, " ");
    if !without_ids.chars().any(char::is_alphanumeric) {
        return String::new();
    }
    collapse_whitespace(&without_ids)
}

/// Like [`normalize`], but also splits off a trailing release year.
///
/// A lone year ("1917") is kept as the title.
pub fn normalize_without_year(raw: &str) -> (String, Option<u32>) {
    let normalized = normalize(raw);
    match normalized.rsplit_once(' ') {
        Some((rest, last)) => match parse_year_token(last) {
            Some(year) => (rest.to_string(), Some(year)),
            None => (normalized, None),
        },
        None => (normalized, None),
    }
}

/// Parse a standalone four-digit year in a plausible release range.
pub fn parse_year_token(token: &str) -> Option<u32> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|y| (1900..=2099).contains(y))
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
