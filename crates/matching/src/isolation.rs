//! Word isolation checks.
//!
//! A candidate found in a text only counts when it stands on its own: the
//! characters right before and after it are either missing (string boundary)
//! or delimiters. This keeps "cat" from matching inside "category".

use crate::error::{MatchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace and common sentence punctuation.
pub const DEFAULT_DELIMITERS: &str = r#"[\s.?!,;"']"#;

static DEFAULT_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_DELIMITERS).expect("default delimiter pattern is valid"));

/// Set of characters that separate words.
#[derive(Debug, Clone)]
pub struct Delimiters {
    pattern: Regex,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DELIMITER_RE.clone(),
        }
    }
}

impl Delimiters {
    /// Build from a pattern matched against single characters.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| MatchError::MalformedPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Whether `c` separates words.
    pub fn is_delimiter(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.pattern.is_match(c.encode_utf8(&mut buf))
    }

    /// Isolation test on pre-split characters, `start` and `len` in chars.
    pub(crate) fn isolated_at(&self, chars: &[char], start: usize, len: usize) -> bool {
        let before_ok = start == 0 || chars.get(start - 1).is_none_or(|&c| self.is_delimiter(c));
        let after_ok = chars.get(start + len).is_none_or(|&c| self.is_delimiter(c));
        before_ok && after_ok
    }
}

/// Check whether `candidate` occurs in `text` as a standalone word.
///
/// `index` is a character offset; without it the first occurrence is used.
/// Returns `Some(false)` when the candidate does not occur at all and `None`
/// when an explicit index lies beyond the end of `text`.
pub fn is_isolated(
    candidate: &str,
    text: &str,
    delimiters: &Delimiters,
    index: Option<usize>,
) -> Option<bool> {
    let chars: Vec<char> = text.chars().collect();
    let start = match index {
        Some(index) if index > chars.len() => return None,
        Some(index) => index,
        None => match text.find(candidate) {
            Some(byte_pos) => text[..byte_pos].chars().count(),
            None => return Some(false),
        },
    };

    Some(delimiters.isolated_at(&chars, start, candidate.chars().count()))
}
