//! Title policies for the archival catalog, where every upstream item is a
//! single short and the series it belongs to has to be recovered from the
//! free-text title.

use regex::Regex;
use std::sync::OnceLock;

/// Series name used when an item has no title at all.
pub const FALLBACK_SERIES_NAME: &str = "Classic Cartoon";

/// One entry of the ordered series-name policy. `group` is the capture
/// group holding the series name as written in the title.
#[derive(Debug, Clone, Copy)]
pub struct SeriesRule {
    pub pattern: &'static str,
    pub group: usize,
}

impl SeriesRule {
    #[must_use]
    pub const fn new(pattern: &'static str, group: usize) -> Self {
        Self { pattern, group }
    }
}

/// Tried top to bottom; the first rule that matches wins.
pub const SERIES_RULES: &[SeriesRule] = &[
    SeriesRule::new(r"(?i)^(Betty Boop)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Popeye(?:\s+The\s+Sailor)?)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Felix(?:\s+the\s+Cat)?)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Superman)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Woody Woodpecker)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Casper)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Noveltoon)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Gabby)[:\s]", 1),
    SeriesRule::new(r"(?i)^(Flip(?:\s+The\s+Frog)?)[:\s]", 1),
];

/// A compiled, ordered rule list.
pub struct SeriesMatcher {
    rules: Vec<(Regex, usize)>,
}

impl SeriesMatcher {
    pub fn new(rules: &[SeriesRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| Regex::new(rule.pattern).map(|re| (re, rule.group)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The matcher for [`SERIES_RULES`].
    pub fn builtin() -> &'static Self {
        static INSTANCE: OnceLock<SeriesMatcher> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            Self::new(SERIES_RULES).expect("Invalid series pattern defined in code")
        })
    }

    #[must_use]
    pub fn matched_rule(&self, title: &str) -> Option<String> {
        self.rules.iter().find_map(|(re, group)| {
            re.captures(title)
                .and_then(|caps| caps.get(*group))
                .map(|m| m.as_str().to_string())
        })
    }

    /// Rule match, else the text before the first colon, else the whole title.
    #[must_use]
    pub fn extract(&self, title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            return FALLBACK_SERIES_NAME.to_string();
        }

        if let Some(name) = self.matched_rule(title) {
            return name;
        }

        match title.find(':') {
            Some(idx) if idx > 0 => {
                let before = title[..idx].trim();
                if before.is_empty() {
                    title.to_string()
                } else {
                    before.to_string()
                }
            }
            _ => title.to_string(),
        }
    }
}

/// `"Betty Boop: Snow White"` becomes `"Betty Boop"`.
#[must_use]
pub fn extract_series_name(title: &str) -> String {
    SeriesMatcher::builtin().extract(title)
}

/// Stable catalog id for a series: lowercase with whitespace runs turned
/// into single hyphens.
#[must_use]
pub fn series_slug(series: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));
    re.replace_all(&series.trim().to_lowercase(), "-").into_owned()
}

/// Episode display title without the series name.
#[must_use]
pub fn extract_episode_title(title: &str, series: &str) -> String {
    let title = title.trim();

    if let Some(idx) = title.find(':') {
        if idx > 0 && idx < title.len() - 1 {
            let rest = title[idx + 1..].trim();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }

    if let Some(rest) = strip_series_prefix(title, series) {
        return rest.to_string();
    }

    title.to_string()
}

fn strip_series_prefix<'a>(title: &'a str, series: &str) -> Option<&'a str> {
    if series.is_empty() {
        return None;
    }

    let head = title.get(..series.len())?;
    if !head.eq_ignore_ascii_case(series) {
        return None;
    }

    let tail = &title[series.len()..];
    if tail.starts_with(char::is_alphanumeric) {
        return None;
    }

    let rest = tail
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | '|'))
        .trim();
    (!rest.is_empty()).then_some(rest)
}

/// First run of four digits in an upstream date field.
#[must_use]
pub fn extract_year(date: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d{4}").expect("Invalid regex"));
    re.find(date).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_series_name_colon_title() {
        assert_eq!(extract_series_name("Betty Boop: Snow White"), "Betty Boop");
    }

    #[test]
    fn test_extract_series_name_unlisted() {
        assert_eq!(extract_series_name("Unlisted Title"), "Unlisted Title");
    }

    #[test]
    fn test_extract_series_name_rule_without_colon() {
        assert_eq!(
            extract_series_name("Popeye The Sailor Meets Sindbad"),
            "Popeye The Sailor"
        );
        assert_eq!(extract_series_name("felix the cat trifles with time"), "felix the cat");
    }

    #[test]
    fn test_extract_series_name_colon_fallback() {
        assert_eq!(extract_series_name("Krazy Kat: Lil' Ark Angel"), "Krazy Kat");
        assert_eq!(extract_series_name(":Leading colon"), ":Leading colon");
    }

    #[test]
    fn test_extract_series_name_empty() {
        assert_eq!(extract_series_name(""), FALLBACK_SERIES_NAME);
        assert_eq!(extract_series_name("   "), FALLBACK_SERIES_NAME);
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        let title = "Popeye The Sailor: Ancient Fistory";

        let short_first = SeriesMatcher::new(&[
            SeriesRule::new(r"(?i)^(Popeye)[:\s]", 1),
            SeriesRule::new(r"(?i)^(Popeye The Sailor)[:\s]", 1),
        ])
        .unwrap();
        assert_eq!(short_first.extract(title), "Popeye");

        let long_first = SeriesMatcher::new(&[
            SeriesRule::new(r"(?i)^(Popeye The Sailor)[:\s]", 1),
            SeriesRule::new(r"(?i)^(Popeye)[:\s]", 1),
        ])
        .unwrap();
        assert_eq!(long_first.extract(title), "Popeye The Sailor");
    }

    #[test]
    fn test_rule_requires_separator() {
        // "Superman" must be followed by a colon or whitespace
        assert_eq!(extract_series_name("Supermanly"), "Supermanly");
    }

    #[test]
    fn test_series_slug() {
        assert_eq!(series_slug("Betty Boop"), "betty-boop");
        assert_eq!(series_slug("Popeye  The\tSailor"), "popeye-the-sailor");
    }

    #[test]
    fn test_extract_episode_title() {
        assert_eq!(
            extract_episode_title("Betty Boop: Snow White", "Betty Boop"),
            "Snow White"
        );
        assert_eq!(
            extract_episode_title("Popeye The Sailor Meets Sindbad", "Popeye The Sailor"),
            "Meets Sindbad"
        );
        assert_eq!(extract_episode_title("Trailer:", "Trailer"), "Trailer:");
        assert_eq!(extract_episode_title("Gabby", "Gabby"), "Gabby");
        assert_eq!(extract_episode_title("Superb Owl", "Superman"), "Superb Owl");
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("1934-03-02T00:00:00Z"), Some("1934"));
        assert_eq!(extract_year("circa 1940"), Some("1940"));
        assert_eq!(extract_year("193"), None);
    }
}
