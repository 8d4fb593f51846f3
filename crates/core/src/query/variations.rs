//! Ordered search-string variations for a title.
//!
//! The first variation is the most specific guess; later ones trade precision
//! for recall (bare titles for season packs, alternate numerals for events).

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::normalize::{normalize, parse_year_token};
use super::patterns::{
    find_numeral, has_sports_keyword, is_likely_anime, is_sports_title, match_event,
    strip_promotion, strip_qualifiers, EventRule, DEFAULT_WEEKLY_START_YEAR,
};
use crate::searcher::ContentKind;

static YEAR_IN_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

/// Generates search variations. Holds the "current year" used when a sports
/// event carries no year of its own.
#[derive(Debug, Clone)]
pub struct VariationGenerator {
    current_year: u32,
}

impl Default for VariationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VariationGenerator {
    pub fn new() -> Self {
        Self {
            current_year: chrono::Utc::now().year() as u32,
        }
    }

    /// Pin the current year (tests, replays).
    pub fn with_current_year(current_year: u32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> u32 {
        self.current_year
    }

    /// Build the ordered, duplicate-free variation list.
    ///
    /// Returns an empty list only when the title normalizes to nothing.
    pub fn generate(
        &self,
        title: &str,
        kind: ContentKind,
        year: Option<u32>,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Vec<String> {
        let title = strip_matching_year(&normalize(title), year);
        if title.is_empty() {
            return Vec::new();
        }

        let raw = match kind {
            ContentKind::SportsEvent => self.sports_event(&title, year),
            ContentKind::Episodic => episodic(&title, year, season, episode),
            ContentKind::Movie => movie(&title, year),
        };
        dedupe(raw)
    }

    fn sports_event(&self, title: &str, year: Option<u32>) -> Vec<String> {
        let event_year = YEAR_IN_TITLE_RE
            .find(title)
            .and_then(|m| parse_year_token(m.as_str()))
            .or(year)
            .unwrap_or(self.current_year);

        let Some(rule) = match_event(title) else {
            if has_sports_keyword(title) {
                let clean = remove_year(title, event_year);
                return vec![format!("{} {}", clean, event_year)];
            }
            return movie(title, year);
        };

        let mut out = vec![
            format!("{} {}", rule.canonical, event_year),
            rule.canonical.to_string(),
        ];
        if rule.short != rule.canonical {
            out.push(format!("{} {}", rule.short, event_year));
        }

        if let Some((numeral, alternate)) = find_numeral(title) {
            for name in [rule.canonical, rule.short] {
                out.push(format!("{} {}", name, numeral));
                out.push(format!("{} {}", name, alternate));
            }
        }

        let simplified = remove_year(&strip_qualifiers(title), event_year);
        if !simplified.is_empty() {
            out.push(format!("{} {}", simplified, event_year));
        }

        out.extend(rule.aliases.iter().map(|a| a.to_string()));
        out
    }
}

/// Free-function form using the real current year.
pub fn generate_variations(
    title: &str,
    kind: ContentKind,
    year: Option<u32>,
    season: Option<u32>,
    episode: Option<u32>,
) -> Vec<String> {
    VariationGenerator::new().generate(title, kind, year, season, episode)
}

fn movie(title: &str, year: Option<u32>) -> Vec<String> {
    match year {
        Some(y) => vec![format!("{} {}", title, y)],
        None => vec![title.to_string()],
    }
}

fn episodic(
    title: &str,
    year: Option<u32>,
    season: Option<u32>,
    episode: Option<u32>,
) -> Vec<String> {
    let (season, episode) = match (season, episode) {
        (Some(s), Some(e)) => (s, e),
        (None, Some(e)) => (1, e),
        (Some(s), None) => return season_only(title, s),
        (None, None) => {
            let mut out = movie(title, year);
            out.push(title.to_string());
            return out;
        }
    };

    if is_sports_title(title) {
        return weekly_program(title, match_event(title), year, season, episode);
    }

    let token = episode_token(season, episode);

    if is_likely_anime(title, year) {
        let season_part = if season > 1 {
            format!("Season {} ", season)
        } else {
            String::new()
        };
        return vec![
            format!("{} {}", title, token),
            format!("{} Episode {}", title, episode),
            format!("{} {:02}", title, episode),
            format!("{} {}Episode {}", title, season_part, episode),
            title.to_string(),
        ];
    }

    let mut out = vec![format!("{} {}", title, token)];
    if let Some(y) = year {
        out.push(format!("{} {} {}", title, y, token));
    }
    out.push(format!("{} {}", title.replace(' ', "."), token));
    out.push(title.to_string());
    if year.is_some_and(|y| y >= 2010) {
        out.push(format!("{} {} 1080p", title, token));
        out.push(format!("{} {} 720p", title, token));
    }
    out
}

fn season_only(title: &str, season: u32) -> Vec<String> {
    vec![
        format!("{} S{:02}", title, season),
        format!("{} Season {}", title, season),
        title.to_string(),
    ]
}

/// Weekly wrestling shows number seasons by year and episodes by week, so the
/// release date is approximated from the season: `year = start + season / 12`,
/// `month = season % 12 + 1`.
fn weekly_program(
    title: &str,
    rule: Option<&EventRule>,
    year: Option<u32>,
    season: u32,
    episode: u32,
) -> Vec<String> {
    let canonical = rule.map(|r| r.canonical.to_string()).unwrap_or_else(|| title.to_string());
    let short = rule
        .map(|r| r.short.to_string())
        .unwrap_or_else(|| strip_promotion(title));
    let base = year
        .or_else(|| rule.and_then(|r| r.weekly_since))
        .unwrap_or(DEFAULT_WEEKLY_START_YEAR);

    let air_year = base + season / 12;
    let month = season % 12 + 1;
    let token = episode_token(season, episode);

    vec![
        format!("{} {}", canonical, air_year),
        format!("{} {}", short, air_year),
        format!("{} {} {:02}", canonical, air_year, month),
        format!("{} {}", canonical, token),
        format!("{} {}", short, token),
    ]
}

/// Zero-padded `SxxEyy`.
pub fn episode_token(season: u32, episode: u32) -> String {
    format!("S{:02}E{:02}", season, episode)
}

fn remove_year(title: &str, year: u32) -> String {
    let year = year.to_string();
    title
        .split_whitespace()
        .filter(|t| *t != year)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop a trailing year token equal to the tracked year so it is not doubled.
fn strip_matching_year(title: &str, year: Option<u32>) -> String {
    match (year, title.rsplit_once(' ')) {
        (Some(y), Some((rest, last))) if parse_year_token(last) == Some(y) => rest.to_string(),
        _ => title.to_string(),
    }
}

/// Trim, drop blanks, keep the first occurrence of each string.
pub(crate) fn dedupe(variations: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(variations.len());
    for v in variations {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|seen| seen == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> VariationGenerator {
        VariationGenerator::with_current_year(2025)
    }

    #[test]
    fn test_movie_variations() {
        let g = generator();
        assert_eq!(
            g.generate("John.Wick", ContentKind::Movie, Some(2014), None, None),
            vec!["John Wick 2014"]
        );
        assert_eq!(
            g.generate("John Wick", ContentKind::Movie, None, None, None),
            vec!["John Wick"]
        );
        // a year already in the title is not doubled
        assert_eq!(
            g.generate("John Wick 2014", ContentKind::Movie, Some(2014), None, None),
            vec!["John Wick 2014"]
        );
    }

    #[test]
    fn test_generate_variations_free_function() {
        assert_eq!(
            generate_variations("John.Wick", ContentKind::Movie, Some(2014), None, None),
            vec!["John Wick 2014"]
        );
        // with every year supplied the current year plays no part
        assert_eq!(
            generate_variations("Game of Thrones", ContentKind::Episodic, Some(2011), Some(1), Some(1)),
            generator().generate("Game of Thrones", ContentKind::Episodic, Some(2011), Some(1), Some(1))
        );
        assert!(generate_variations("", ContentKind::Movie, None, None, None).is_empty());
    }

    #[test]
    fn test_empty_title_has_no_variations() {
        let g = generator();
        assert!(g.generate("  ", ContentKind::Movie, Some(2020), None, None).is_empty());
        assert!(g.generate("tt0944947", ContentKind::Episodic, None, Some(1), Some(1)).is_empty());
    }

    #[test]
    fn test_regular_series_variations() {
        let g = generator();
        let v = g.generate("Game of Thrones", ContentKind::Episodic, Some(2011), Some(1), Some(1));
        assert_eq!(
            v,
            vec![
                "Game of Thrones S01E01",
                "Game of Thrones 2011 S01E01",
                "Game.of.Thrones S01E01",
                "Game of Thrones",
                "Game of Thrones S01E01 1080p",
                "Game of Thrones S01E01 720p",
            ]
        );
    }

    #[test]
    fn test_older_series_skips_quality_variants() {
        let g = generator();
        let v = g.generate("Friends", ContentKind::Episodic, Some(1994), Some(2), Some(10));
        // the dotted form equals the plain one for single-word titles
        assert_eq!(v, vec!["Friends S02E10", "Friends 1994 S02E10", "Friends"]);
    }

    #[test]
    fn test_anime_variations() {
        let g = generator();
        let v = g.generate("Attack on Titan", ContentKind::Episodic, Some(2013), Some(2), Some(5));
        assert_eq!(
            v,
            vec![
                "Attack on Titan S02E05",
                "Attack on Titan Episode 5",
                "Attack on Titan 05",
                "Attack on Titan Season 2 Episode 5",
                "Attack on Titan",
            ]
        );

        // season 1 collapses the season-qualified form into the plain one
        let v = g.generate("Naruto", ContentKind::Episodic, Some(2002), Some(1), Some(3));
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_episodic_without_episode_info() {
        let g = generator();
        assert_eq!(
            g.generate("Dark", ContentKind::Episodic, Some(2017), None, None),
            vec!["Dark 2017", "Dark"]
        );
        assert_eq!(
            g.generate("Dark", ContentKind::Episodic, None, Some(3), None),
            vec!["Dark S03", "Dark Season 3", "Dark"]
        );
    }

    #[test]
    fn test_weekly_program_variations() {
        let g = generator();
        let v = g.generate("WWE Raw", ContentKind::Episodic, Some(1993), Some(33), Some(15));
        assert_eq!(
            v,
            vec![
                "WWE Raw 1995",
                "Raw 1995",
                "WWE Raw 1995 10",
                "WWE Raw S33E15",
                "Raw S33E15",
            ]
        );
    }

    #[test]
    fn test_weekly_program_default_base_year() {
        let g = generator();
        let v = g.generate("WWE Main Event", ContentKind::Episodic, None, Some(12), Some(1));
        assert_eq!(v[0], "WWE Main Event 1994");
        assert_eq!(v[1], "Main Event 1994");
        assert_eq!(v[2], "WWE Main Event 1994 01");
    }

    #[test]
    fn test_wrestlemania_numeral_forms() {
        let g = generator();
        let v = g.generate("WWE WrestleMania 40", ContentKind::SportsEvent, Some(2024), None, None);
        assert_eq!(v[0], "WWE WrestleMania 2024");
        assert_eq!(v[1], "WWE WrestleMania");
        assert!(v.iter().any(|s| s.contains("40")));
        assert!(v.iter().any(|s| s.contains("XL")));
        assert!(v.contains(&"WrestleMania XL".to_string()));
        assert!(v.contains(&"WWE WrestleMania 40 2024".to_string()));
    }

    #[test]
    fn test_sports_event_year_from_title_then_current() {
        let g = generator();
        let v = g.generate("Royal Rumble 2023", ContentKind::SportsEvent, Some(2019), None, None);
        assert_eq!(v[0], "WWE Royal Rumble 2023");

        let v = g.generate("WWE Clash in Paris", ContentKind::SportsEvent, None, None, None);
        assert_eq!(v[0], "WWE Clash in Paris 2025");
        assert!(v.contains(&"WWE Clash".to_string()));
    }

    #[test]
    fn test_sports_keyword_only() {
        let g = generator();
        let v = g.generate("WWE Some Special 2022", ContentKind::SportsEvent, None, None, None);
        assert_eq!(v, vec!["WWE Some Special 2022"]);
    }

    #[test]
    fn test_sports_kind_without_sports_title_is_movie_like() {
        let g = generator();
        let v = g.generate("Rocky", ContentKind::SportsEvent, Some(1976), None, None);
        assert_eq!(v, vec!["Rocky 1976"]);
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let v = dedupe(vec![
            " a ".to_string(),
            "b".to_string(),
            "a".to_string(),
            "".to_string(),
        ]);
        assert_eq!(v, vec!["a", "b"]);
    }
}
