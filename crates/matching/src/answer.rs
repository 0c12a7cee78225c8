//! Preparation of the learner's answer before matching.

use essay_core::config::BehaviourConfig;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use unicode_segmentation::UnicodeSegmentation;

static LINEBREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

/// Answer text ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerText {
    text: String,
    length: usize,
    truncated: bool,
}

impl AnswerText {
    /// Replace line breaks and cut the answer to the task's maximum length.
    ///
    /// Lengths are counted in user-perceived characters (grapheme clusters).
    pub fn prepare(raw: &str, behaviour: &BehaviourConfig) -> Self {
        let replaced = LINEBREAK_RE.replace_all(raw, NoExpand(&behaviour.linebreak_replacement));

        let mut length = replaced.graphemes(true).count();
        let mut truncated = false;
        let text = match behaviour.maximum_length {
            Some(max) if length > max => {
                truncated = true;
                length = max;
                replaced.graphemes(true).take(max).collect()
            }
            _ => replaced.into_owned(),
        };

        Self {
            text,
            length,
            truncated,
        }
    }

    /// Text to match against.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the answer is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the maximum length cut something off.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_replaced() {
        let answer = AnswerText::prepare("one\r\ntwo\nthree\rfour", &BehaviourConfig::default());
        assert_eq!(answer.as_str(), "one two three four");
        assert!(!answer.was_truncated());
    }

    #[test]
    fn test_custom_replacement() {
        let behaviour = BehaviourConfig {
            linebreak_replacement: " | ".to_string(),
            ..BehaviourConfig::default()
        };
        assert_eq!(AnswerText::prepare("a\nb", &behaviour).as_str(), "a | b");
    }

    #[test]
    fn test_truncated_to_maximum_length() {
        let behaviour = BehaviourConfig {
            maximum_length: Some(5),
            ..BehaviourConfig::default()
        };
        let answer = AnswerText::prepare("crème brûlée", &behaviour);
        assert_eq!(answer.as_str(), "crème");
        assert_eq!(answer.len(), 5);
        assert!(answer.was_truncated());
    }

    #[test]
    fn test_length_counts_graphemes() {
        let answer = AnswerText::prepare("e\u{301}t\u{e9}", &BehaviourConfig::default());
        assert_eq!(answer.len(), 3);
        assert!(!answer.is_empty());
    }
}
