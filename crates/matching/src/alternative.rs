//! Keyword alternatives.
//!
//! Authored alternatives come in three shapes: plain phrases, phrases with
//! `*` wildcards and `/regex/` literals. Regex literals never reach the
//! detectors directly. They are run against the answer first, and whatever
//! they match is fed back as an [`Alternative::Extracted`] phrase whose
//! asterisks are plain characters.

use crate::error::{MatchError, Result};
use essay_core::text::{decode_html, regex_literal_body};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// One phrase a keyword group accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alternative {
    /// Authored phrase; `*` stands for one or more letters
    Literal(String),
    /// Text captured by a regex alternative; `*` is a literal asterisk
    Extracted(String),
}

impl Alternative {
    /// The phrase text.
    pub fn text(&self) -> &str {
        match self {
            Alternative::Literal(text) | Alternative::Extracted(text) => text,
        }
    }

    /// Whether the wildcard detector applies.
    pub fn has_wildcard(&self) -> bool {
        matches!(self, Alternative::Literal(text) if text.contains('*'))
    }

    /// Text the exact detector searches for.
    ///
    /// The first wildcard `*` of a literal is removed, so `photo*` also
    /// accepts the bare stem `photo`. Extracted text is used as found.
    pub fn exact_text(&self) -> Cow<'_, str> {
        match self {
            Alternative::Literal(text) if text.contains('*') => Cow::Owned(text.replacen('*', "", 1)),
            Alternative::Literal(text) | Alternative::Extracted(text) => Cow::Borrowed(text),
        }
    }

    /// Same alternative with its text lowercased.
    pub fn to_lowercase(&self) -> Self {
        match self {
            Alternative::Literal(text) => Alternative::Literal(text.to_lowercase()),
            Alternative::Extracted(text) => Alternative::Extracted(text.to_lowercase()),
        }
    }
}

/// Alternatives of one keyword group, prepared once per task.
#[derive(Debug, Clone)]
pub struct AlternativeSet {
    literals: Vec<Alternative>,
    patterns: Vec<Regex>,
    case_sensitive: bool,
}

impl AlternativeSet {
    /// Split the keyword and authored alternatives into phrases and compiled regex literals.
    ///
    /// Empty phrases are dropped. A regex literal that does not compile is
    /// an authoring error and fails the whole set.
    pub fn new<'a, I>(keyword: &'a str, alternatives: I, case_sensitive: bool) -> Result<Self>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut literals = Vec::new();
        let mut patterns = Vec::new();

        for raw in std::iter::once(keyword).chain(alternatives.into_iter().map(String::as_str)) {
            let decoded = decode_html(raw);
            if let Some(body) = regex_literal_body(&decoded) {
                let pattern = RegexBuilder::new(body)
                    .case_insensitive(!case_sensitive)
                    .build()
                    .map_err(|source| MatchError::MalformedPattern {
                        pattern: body.to_string(),
                        source,
                    })?;
                patterns.push(pattern);
            } else if !decoded.is_empty() {
                literals.push(Alternative::Literal(decoded.into_owned()));
            }
        }

        Ok(Self {
            literals,
            patterns,
            case_sensitive,
        })
    }

    /// Authored phrases, keyword first.
    pub fn literals(&self) -> &[Alternative] {
        &self.literals
    }

    /// Number of regex literals.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Distinct texts the regex literals capture in `answer`, in order of
    /// first appearance. Texts equal to an authored phrase are skipped.
    pub fn extract(&self, answer: &str) -> Vec<Alternative> {
        let mut extracted: Vec<Alternative> = Vec::new();
        for pattern in &self.patterns {
            for found in pattern.find_iter(answer).map(|m| m.as_str()) {
                let known = found.is_empty()
                    || self.literals.iter().any(|literal| self.same_text(literal.text(), found))
                    || extracted.iter().any(|alternative| self.same_text(alternative.text(), found));
                if !known {
                    extracted.push(Alternative::Extracted(found.to_string()));
                }
            }
        }
        extracted
    }

    fn same_text(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_decodes_html() {
        let alternatives = strings(&["<b>Tom &amp; Jerry</b>"]);
        let set = AlternativeSet::new("cartoon", &alternatives, true).unwrap();
        assert_eq!(set.literals()[1], Alternative::Literal("Tom & Jerry".into()));
    }

    #[test]
    fn test_wildcard_only_for_literals() {
        assert!(Alternative::Literal("c*t".into()).has_wildcard());
        assert!(!Alternative::Literal("cat".into()).has_wildcard());
        assert!(!Alternative::Extracted("c*t".into()).has_wildcard());
    }

    #[test]
    fn test_exact_text_strips_first_wildcard() {
        assert_eq!(Alternative::Literal("photo*".into()).exact_text(), "photo");
        assert_eq!(Alternative::Literal("a*b*".into()).exact_text(), "ab*");
        assert_eq!(Alternative::Literal("cat".into()).exact_text(), "cat");
        assert_eq!(Alternative::Extracted("a*b".into()).exact_text(), "a*b");
    }

    #[test]
    fn test_set_splits_regex_literals() {
        let alternatives = strings(&["feline", "/c[ao]t/", ""]);
        let set = AlternativeSet::new("cat", &alternatives, true).unwrap();
        assert_eq!(
            set.literals(),
            &[
                Alternative::Literal("cat".into()),
                Alternative::Literal("feline".into())
            ]
        );
        assert_eq!(set.pattern_count(), 1);
    }

    #[test]
    fn test_extract_regex_matches() {
        let alternatives = strings(&["/c[ao]t/"]);
        let set = AlternativeSet::new("feline", &alternatives, true).unwrap();
        let extracted = set.extract("a cat and a cot and a cat");
        assert_eq!(
            extracted,
            vec![
                Alternative::Extracted("cat".into()),
                Alternative::Extracted("cot".into()),
            ]
        );
    }

    #[test]
    fn test_extract_skips_authored_phrases() {
        let alternatives = strings(&["/c[ao]t/"]);
        let set = AlternativeSet::new("cat", &alternatives, true).unwrap();
        assert_eq!(set.extract("cat cot"), vec![Alternative::Extracted("cot".into())]);
    }

    #[test]
    fn test_extract_keeps_literal_asterisk() {
        let alternatives = strings(&[r"/a\*b/"]);
        let set = AlternativeSet::new("x", &alternatives, true).unwrap();
        let extracted = set.extract("see a*b here");
        assert_eq!(extracted, vec![Alternative::Extracted("a*b".into())]);
        assert!(!extracted[0].has_wildcard());
    }

    #[test]
    fn test_regex_case_insensitive() {
        let alternatives = strings(&["/dogs?/"]);
        let set = AlternativeSet::new("hound", &alternatives, false).unwrap();
        assert_eq!(set.extract("Dogs bark"), vec![Alternative::Extracted("Dogs".into())]);
        // "HOUND" is the keyword in another case, not a new phrase
        let alternatives = strings(&["/h[a-z]+/"]);
        let set = AlternativeSet::new("hound", &alternatives, false).unwrap();
        assert!(set.extract("HOUND").is_empty());
    }

    #[test]
    fn test_malformed_regex() {
        let alternatives = strings(&["/ca(t/"]);
        let err = AlternativeSet::new("cat", &alternatives, true).unwrap_err();
        assert!(matches!(err, MatchError::MalformedPattern { ref pattern, .. } if pattern == "ca(t"));
    }
}
