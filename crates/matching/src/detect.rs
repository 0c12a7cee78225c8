//! Match detectors.
//!
//! Three independent strategies look for one needle in the learner's answer:
//! exact substring search, `*` wildcard patterns and approximate matching.
//! All of them report character offsets into the full haystack, so results
//! of different detectors can be compared by position.

use crate::error::{MatchError, Result};
use crate::isolation::Delimiters;
use crate::similarity::{are_similar, fuzzy_windows};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Letters a wildcard may stand for: Latin (with accents), Greek, Cyrillic,
/// Hiragana, Katakana, common CJK ideographs and Thai. Digits, whitespace and
/// punctuation are excluded so a wildcard never runs across a word boundary.
pub const WILDCARD_CHARS: &str = r"[A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{02AF}\x{0370}-\x{03FF}\x{0400}-\x{04FF}\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}\x{0E00}-\x{0E7F}]";

static REPEATED_WILDCARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{2,}").expect("wildcard collapse pattern is valid"));

/// One occurrence of an alternative in the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// The alternative that was searched for
    pub keyword: String,
    /// The text found in the answer
    #[serde(rename = "match")]
    pub matched: String,
    /// Character offset in the answer
    pub index: usize,
}

impl Match {
    /// Length of the matched text in characters.
    pub fn len(&self) -> usize {
        self.matched.chars().count()
    }

    /// Whether the matched text is empty.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Whether a match already recorded overlaps or touches `index`.
pub fn contains(results: &[Match], index: usize) -> bool {
    results.iter().any(|result| result.index.abs_diff(index) <= result.len())
}

/// Find every standalone occurrence of `needle` as written.
///
/// Occurrences do not overlap: the scan resumes after each hit.
pub fn detect_exact(needle: &str, haystack: &str, delimiters: &Delimiters) -> Vec<Match> {
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = haystack.chars().collect();
    let needle_len = needle.chars().count();
    let mut results = Vec::new();
    let mut scanned_bytes = 0;
    let mut scanned_chars = 0;

    for (byte_pos, found) in haystack.match_indices(needle) {
        scanned_chars += haystack[scanned_bytes..byte_pos].chars().count();
        scanned_bytes = byte_pos;

        if delimiters.isolated_at(&chars, scanned_chars, needle_len) {
            results.push(Match {
                keyword: needle.to_string(),
                matched: found.to_string(),
                index: scanned_chars,
            });
        }
    }

    tracing::trace!(needle, found = results.len(), "exact detection");
    results
}

/// Compile a wildcard needle into a regular expression.
///
/// Runs of `*` collapse into one, everything else is matched literally.
pub fn wildcard_regex(needle: &str, case_sensitive: bool) -> Result<Regex> {
    let collapsed = REPEATED_WILDCARD_RE.replace_all(needle, "*");
    let pattern = collapsed
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(&format!("{}+", WILDCARD_CHARS));

    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|source| MatchError::MalformedPattern { pattern, source })
}

/// Find every standalone text matching a `*` wildcard needle.
///
/// Needles without a wildcard yield nothing.
pub fn detect_wildcard(
    needle: &str,
    haystack: &str,
    case_sensitive: bool,
    delimiters: &Delimiters,
) -> Result<Vec<Match>> {
    if !needle.contains('*') {
        return Ok(Vec::new());
    }

    let regex = wildcard_regex(needle, case_sensitive)?;
    Ok(detect_pattern(&regex, needle, haystack, delimiters))
}

/// Find every standalone text matched by an already compiled wildcard pattern.
pub fn detect_pattern(
    regex: &Regex,
    needle: &str,
    haystack: &str,
    delimiters: &Delimiters,
) -> Vec<Match> {
    let chars: Vec<char> = haystack.chars().collect();
    let mut results = Vec::new();
    let mut scanned_bytes = 0;
    let mut scanned_chars = 0;

    for found in regex.find_iter(haystack) {
        scanned_chars += haystack[scanned_bytes..found.start()].chars().count();
        scanned_bytes = found.start();

        let len = found.as_str().chars().count();
        if delimiters.isolated_at(&chars, scanned_chars, len) {
            results.push(Match {
                keyword: needle.to_string(),
                matched: found.as_str().to_string(),
                index: scanned_chars,
            });
        }
    }

    tracing::trace!(needle, found = results.len(), "wildcard detection");
    results
}

/// Find every standalone text that is a near miss of `needle`.
///
/// Every window of the needle's length give or take two characters is
/// compared at every position. Overlapping finds are reported once.
pub fn detect_fuzzy(needle: &str, haystack: &str, delimiters: &Delimiters) -> Vec<Match> {
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = haystack.chars().collect();
    let mut results: Vec<Match> = Vec::new();

    for (pos, straw) in fuzzy_windows(needle.chars().count(), &chars) {
        if are_similar(needle, &straw)
            && delimiters.isolated_at(&chars, pos, straw.chars().count())
            && !contains(&results, pos)
        {
            results.push(Match {
                keyword: needle.to_string(),
                matched: straw,
                index: pos,
            });
        }
    }

    tracing::trace!(needle, found = results.len(), "fuzzy detection");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(needle: &str, haystack: &str) -> Vec<Match> {
        detect_exact(needle, haystack, &Delimiters::default())
    }

    fn indices(matches: &[Match]) -> Vec<usize> {
        matches.iter().map(|m| m.index).collect()
    }

    #[test]
    fn test_exact_counts_every_occurrence() {
        let matches = exact("cat", "the cat and the cat");
        assert_eq!(indices(&matches), vec![4, 16]);
        assert!(matches.iter().all(|m| m.matched == "cat" && m.keyword == "cat"));
    }

    #[test]
    fn test_exact_requires_isolation() {
        assert!(exact("cat", "category concatenate").is_empty());
        assert_eq!(indices(&exact("cat", "scat, cat.")), vec![6]);
    }

    #[test]
    fn test_exact_adjacent_occurrences_are_not_isolated() {
        assert!(exact("cat", "catcat").is_empty());
    }

    #[test]
    fn test_exact_empty_needle() {
        assert!(exact("", "anything").is_empty());
    }

    #[test]
    fn test_exact_multibyte_offsets() {
        assert_eq!(indices(&exact("été", "un été, un été")), vec![3, 11]);
    }

    #[test]
    fn test_exact_phrase() {
        assert_eq!(indices(&exact("H5P", "I used H5P today")), vec![7]);
        assert_eq!(indices(&exact("the cat", "see the cat")), vec![4]);
    }

    #[test]
    fn test_wildcard_matches_letters_only() {
        let matches =
            detect_wildcard("c*t", "the cat sat the cot", false, &Delimiters::default()).unwrap();
        assert_eq!(indices(&matches), vec![4, 16]);
        assert_eq!(matches[0].matched, "cat");
        assert_eq!(matches[1].matched, "cot");
    }

    #[test]
    fn test_wildcard_does_not_span_words() {
        let delimiters = Delimiters::default();
        assert!(detect_wildcard("c*t", "c t, c-t, c1t", false, &delimiters)
            .unwrap()
            .is_empty());

        let matches = detect_wildcard("c*t", "construct", false, &delimiters).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched, "construct");
    }

    #[test]
    fn test_wildcard_needs_at_least_one_letter() {
        let matches = detect_wildcard("photo*", "photo photos", false, &Delimiters::default()).unwrap();
        assert_eq!(indices(&matches), vec![6]);
    }

    #[test]
    fn test_wildcard_escapes_metacharacters() {
        let matches = detect_wildcard("c++ *s", "c++ rocks", true, &Delimiters::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched, "c++ rocks");
    }

    #[test]
    fn test_wildcard_collapses_repeats() {
        let regex = wildcard_regex("a***b", true).unwrap();
        assert!(regex.is_match("axyb"));
        assert_eq!(regex.as_str().matches('+').count(), 1);
    }

    #[test]
    fn test_wildcard_case_sensitivity() {
        let delimiters = Delimiters::default();
        assert!(detect_wildcard("c*t", "CAT", true, &delimiters).unwrap().is_empty());
        assert_eq!(detect_wildcard("c*t", "CAT", false, &delimiters).unwrap().len(), 1);
    }

    #[test]
    fn test_wildcard_accented_letters() {
        let matches = detect_wildcard("caf*", "un café noir", false, &Delimiters::default()).unwrap();
        assert_eq!(indices(&matches), vec![3]);
        assert_eq!(matches[0].matched, "café");
    }

    #[test]
    fn test_wildcard_without_asterisk() {
        assert!(detect_wildcard("cat", "cat", true, &Delimiters::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fuzzy_finds_typos() {
        let matches = detect_fuzzy("photosynthesis", "it uses fotosynthesis daily", &Delimiters::default());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index, 8);
        assert_eq!(matches[0].matched, "fotosynthesis");
    }

    #[test]
    fn test_fuzzy_reports_each_occurrence_once() {
        let matches = detect_fuzzy("house", "a house and a hosue", &Delimiters::default());
        assert_eq!(indices(&matches), vec![2, 14]);
    }

    #[test]
    fn test_fuzzy_short_words_must_be_exact() {
        assert!(detect_fuzzy("cat", "the cot sat", &Delimiters::default()).is_empty());
    }

    #[test]
    fn test_contains_proximity() {
        let results = vec![Match {
            keyword: "house".into(),
            matched: "house".into(),
            index: 10,
        }];
        assert!(contains(&results, 10));
        assert!(contains(&results, 15));
        assert!(contains(&results, 5));
        assert!(!contains(&results, 16));
        assert!(!contains(&results, 4));
        assert!(!contains(&[], 0));
    }
}
