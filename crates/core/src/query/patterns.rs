//! Title classification tables: sports events, anime franchises, numerals.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::normalize::parse_year_token;

/// Default franchise start year for weekly shows with no table entry.
pub const DEFAULT_WEEKLY_START_YEAR: u32 = 1993;

/// A recurring sports event or weekly program.
#[derive(Debug)]
pub struct EventRule {
    matcher: Regex,
    /// Name used as the primary search term.
    pub canonical: &'static str,
    /// Name without the promotion prefix.
    pub short: &'static str,
    /// Shorter or older names the event is also released under.
    pub aliases: &'static [&'static str],
    /// Start year for weekly programs; `None` for one-off events.
    pub weekly_since: Option<u32>,
}

impl EventRule {
    pub fn is_weekly(&self) -> bool {
        self.weekly_since.is_some()
    }
}

fn rule(
    pattern: &str,
    canonical: &'static str,
    short: &'static str,
    aliases: &'static [&'static str],
    weekly_since: Option<u32>,
) -> EventRule {
    EventRule {
        matcher: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        canonical,
        short,
        aliases,
        weekly_since,
    }
}

/// Ordered event table. The first matching rule wins, so specific names come
/// before generic ones.
static EVENT_RULES: Lazy<Vec<EventRule>> = Lazy::new(|| {
    vec![
        // premium live events
        rule(r"wwe.*clash.*castle", "WWE Clash at the Castle", "Clash at the Castle", &["WWE Clash"], None),
        rule(r"wwe.*clash.*paris", "WWE Clash in Paris", "Clash in Paris", &["WWE Clash"], None),
        rule(r"wrestle\s*mania", "WWE WrestleMania", "WrestleMania", &[], None),
        rule(r"royal\s*rumble", "WWE Royal Rumble", "Royal Rumble", &[], None),
        rule(r"summer\s*slam", "WWE SummerSlam", "SummerSlam", &[], None),
        rule(r"wwe.*survivor.*series", "WWE Survivor Series", "Survivor Series", &[], None),
        rule(r"wwe.*money.*bank", "WWE Money in the Bank", "Money in the Bank", &[], None),
        rule(r"elimination.*chamber", "WWE Elimination Chamber", "Elimination Chamber", &[], None),
        rule(r"wwe.*night.*champions", "WWE Night of Champions", "Night of Champions", &[], None),
        rule(r"wwe.*battleground", "WWE Battleground", "Battleground", &[], None),
        rule(r"wwe.*backlash", "WWE Backlash", "Backlash", &[], None),
        rule(r"wwe.*fastlane", "WWE Fastlane", "Fastlane", &[], None),
        rule(r"wwe.*crown.*jewel", "WWE Crown Jewel", "Crown Jewel", &[], None),
        rule(r"wwe.*extreme.*rules", "WWE Extreme Rules", "Extreme Rules", &[], None),
        rule(r"wwe.*hell.*cell", "WWE Hell in a Cell", "Hell in a Cell", &[], None),
        rule(r"wwe.*judge?ment.*day", "WWE Judgment Day", "Judgment Day", &[], None),
        rule(r"wwe.*king.*ring", "WWE King of the Ring", "King of the Ring", &[], None),
        rule(r"wwe.*bad.*blood", "WWE Bad Blood", "Bad Blood", &[], None),
        // weekly shows
        rule(r"wwe.*\braw\b", "WWE Raw", "Raw", &["WWE Monday Night Raw"], Some(1993)),
        rule(r"smack\s*down", "WWE SmackDown", "SmackDown", &[], Some(1999)),
        rule(r"wwe.*\bnxt\b", "WWE NXT", "NXT", &[], Some(2010)),
        // legacy pay-per-views
        rule(r"wwe.*unforgiven", "WWE Unforgiven", "Unforgiven", &[], None),
        rule(r"wwe.*vengeance", "WWE Vengeance", "Vengeance", &[], None),
        rule(r"wwe.*armageddon", "WWE Armageddon", "Armageddon", &[], None),
        rule(r"wwe.*no.*mercy", "WWE No Mercy", "No Mercy", &[], None),
        rule(r"wwe.*insurrextion", "WWE Insurrextion", "Insurrextion", &[], None),
        // other promotions
        rule(r"aew.*revolution", "AEW Revolution", "Revolution", &[], None),
        rule(r"aew.*double.*nothing", "AEW Double or Nothing", "Double or Nothing", &[], None),
        rule(r"aew.*all.*out", "AEW All Out", "All Out", &[], None),
        rule(r"aew.*full.*gear", "AEW Full Gear", "Full Gear", &[], None),
        rule(r"aew.*dynamite", "AEW Dynamite", "Dynamite", &[], Some(2019)),
        rule(r"aew.*rampage", "AEW Rampage", "Rampage", &[], Some(2021)),
        rule(r"\bufc\b.*fight.*night", "UFC Fight Night", "Fight Night", &[], None),
        rule(r"\bufc\b.*\d+", "UFC", "UFC", &[], None),
        rule(r"\bboxing\b", "Boxing", "Boxing", &[], None),
        rule(r"heavyweight.*championship", "Heavyweight Championship", "Heavyweight Championship", &[], None),
    ]
});

static SPORTS_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(wwe|aew|ufc|boxing|wrestl[a-z]*)\b").unwrap());

/// Words that event listings carry but releases usually do not.
static QUALIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(kickoff|press|conference|event)\b").unwrap());

static PROMOTION_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(wwe|aew)\s+").unwrap());

const ANIME_FRANCHISES: &[&str] = &[
    "naruto",
    "one piece",
    "attack on titan",
    "dragon ball",
    "death note",
    "bleach",
    "hunter x hunter",
];

/// Find the first event rule matching a title.
pub fn match_event(title: &str) -> Option<&'static EventRule> {
    EVENT_RULES.iter().find(|r| r.matcher.is_match(title))
}

/// Whether a title mentions a promotion or combat sport.
pub fn has_sports_keyword(title: &str) -> bool {
    SPORTS_KEYWORD_RE.is_match(title)
}

/// Whether a title should be searched with the sports strategies.
pub fn is_sports_title(title: &str) -> bool {
    match_event(title).is_some() || has_sports_keyword(title)
}

/// Remove listing-only qualifier words.
pub fn strip_qualifiers(title: &str) -> String {
    super::normalize::collapse_whitespace(&QUALIFIER_RE.replace_all(title, " "))
}

/// Remove a leading "WWE"/"AEW" promotion name.
pub fn strip_promotion(title: &str) -> String {
    PROMOTION_PREFIX_RE.replace(title, "").trim().to_string()
}

/// Anime heuristic: a known franchise, or a non-ASCII title from 1990 on.
pub fn is_likely_anime(title: &str, year: Option<u32>) -> bool {
    let lower = title.to_lowercase();
    if ANIME_FRANCHISES.iter().any(|f| lower.contains(f)) {
        return true;
    }
    year.is_some_and(|y| y >= 1990) && !title.is_ascii()
}

/// The first convertible numeral in a title, with its alternate form.
///
/// Arabic numbers 1..=999 that are not years convert to roman; uppercase
/// roman numerals of two or more letters convert to arabic.
pub fn find_numeral(title: &str) -> Option<(String, String)> {
    title.split_whitespace().find_map(|token| {
        if parse_year_token(token).is_some() {
            return None;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            let n: u32 = token.parse().ok()?;
            if (1..=999).contains(&n) {
                return Some((token.to_string(), to_roman(n)?));
            }
            return None;
        }
        if token.len() >= 2 {
            let n = from_roman(token)?;
            return Some((token.to_string(), n.to_string()));
        }
        None
    })
}

const ROMAN: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Convert 1..=3999 to an uppercase roman numeral.
pub fn to_roman(mut n: u32) -> Option<String> {
    if n == 0 || n > 3999 {
        return None;
    }
    let mut out = String::new();
    for &(value, symbol) in ROMAN {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}

/// Parse a canonical uppercase roman numeral.
///
/// Non-canonical spellings ("IIII", "VX") are rejected by round-tripping.
pub fn from_roman(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| "IVXLCDM".contains(c)) {
        return None;
    }
    let digit = |c: char| match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        _ => 1000,
    };
    let values: Vec<i64> = s.chars().map(digit).collect();
    let total: i64 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| match values.get(i + 1) {
            Some(&next) if next > v => -v,
            _ => v,
        })
        .sum();
    let total = u32::try_from(total).ok()?;
    (to_roman(total)? == s).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_event_specific_before_generic() {
        let rule = match_event("WWE Clash in Paris 2025").unwrap();
        assert_eq!(rule.canonical, "WWE Clash in Paris");

        let rule = match_event("wwe wrestlemania 40").unwrap();
        assert_eq!(rule.canonical, "WWE WrestleMania");
        assert!(!rule.is_weekly());

        let rule = match_event("UFC Fight Night 240").unwrap();
        assert_eq!(rule.canonical, "UFC Fight Night");
    }

    #[test]
    fn test_match_event_weekly() {
        let rule = match_event("WWE Monday Night RAW").unwrap();
        assert_eq!(rule.canonical, "WWE Raw");
        assert_eq!(rule.weekly_since, Some(1993));

        // "raw" only counts as a whole word
        assert!(match_event("WWE Drawn Together").is_none());
    }

    #[test]
    fn test_sports_keywords() {
        assert!(has_sports_keyword("WWE Main Event"));
        assert!(has_sports_keyword("Pro Wrestling Tonight"));
        assert!(!has_sports_keyword("Game of Thrones"));
        assert!(!is_sports_title("The Dark Knight"));
        assert!(is_sports_title("Royal Rumble 2024"));
    }

    #[test]
    fn test_strip_qualifiers_and_promotion() {
        assert_eq!(
            strip_qualifiers("WWE WrestleMania XL Kickoff Event"),
            "WWE WrestleMania XL"
        );
        assert_eq!(strip_promotion("WWE Raw"), "Raw");
        assert_eq!(strip_promotion("Boxing"), "Boxing");
    }

    #[test]
    fn test_is_likely_anime() {
        assert!(is_likely_anime("Attack on Titan", Some(2013)));
        assert!(is_likely_anime("Hunter x Hunter", None));
        assert!(is_likely_anime("進撃の巨人", Some(2013)));
        assert!(!is_likely_anime("進撃の巨人", Some(1985)));
        assert!(!is_likely_anime("Game of Thrones", Some(2011)));
    }

    #[test]
    fn test_roman_conversion() {
        assert_eq!(to_roman(40).as_deref(), Some("XL"));
        assert_eq!(to_roman(1994).as_deref(), Some("MCMXCIV"));
        assert_eq!(to_roman(0), None);
        assert_eq!(from_roman("XL"), Some(40));
        assert_eq!(from_roman("XXXIX"), Some(39));
        assert_eq!(from_roman("IIII"), None);
        assert_eq!(from_roman("IM"), None);
        assert_eq!(from_roman("xl"), None);
    }

    #[test]
    fn test_find_numeral() {
        assert_eq!(
            find_numeral("WWE WrestleMania 40 2024"),
            Some(("40".to_string(), "XL".to_string()))
        );
        assert_eq!(
            find_numeral("WWE WrestleMania XL"),
            Some(("XL".to_string(), "40".to_string()))
        );
        assert_eq!(find_numeral("WWE Royal Rumble 2024"), None);
        // single letters are words, not numerals
        assert_eq!(find_numeral("Boxing I Am"), None);
    }
}
