//! Task configuration schema
//!
//! Field names follow the authoring tool's JSON export (camelCase), so a
//! content export can be scored without conversion. TOML files use the same
//! names.

use serde::{Deserialize, Serialize};

/// Root configuration of one essay task
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    /// Optional title, only used for display
    #[serde(default)]
    pub title: Option<String>,

    /// Scored keyword groups, in authoring order
    #[serde(default)]
    pub keywords: Vec<KeywordGroup>,

    #[serde(default)]
    pub behaviour: BehaviourConfig,

    /// Overall feedback by score percentage
    #[serde(default)]
    pub overall_feedback: Vec<FeedbackRange>,

    #[serde(default)]
    pub solution: SolutionConfig,
}

impl TaskConfig {
    /// Sum of `points * occurrences` over all groups that carry a keyword
    pub fn theoretical_max(&self) -> f64 {
        self.keywords
            .iter()
            .filter(|group| group.has_keyword())
            .map(|group| group.options.points * f64::from(group.options.occurrences))
            .sum()
    }
}

/// One scored unit: a primary keyword plus equivalent phrasings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    /// Primary keyword. Groups without one are not scored.
    #[serde(default)]
    pub keyword: Option<String>,

    /// Literal phrases, `*` wildcard patterns or `/regex/` literals
    #[serde(default)]
    pub alternatives: Vec<String>,

    #[serde(default)]
    pub options: KeywordOptions,
}

impl KeywordGroup {
    /// Create a group with default options
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    /// Builder-style alternatives
    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives = alternatives.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style options
    pub fn with_options(mut self, options: KeywordOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether the group has a primary keyword; an empty one still counts
    pub fn has_keyword(&self) -> bool {
        self.keyword.is_some()
    }
}

/// Per-group scoring options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordOptions {
    /// Points awarded per counted occurrence
    #[serde(default = "default_points")]
    pub points: f64,

    /// Maximum number of occurrences that count
    #[serde(default = "default_occurrences")]
    pub occurrences: u32,

    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Accept small spelling mistakes
    #[serde(default)]
    pub forgive_mistakes: bool,

    #[serde(default)]
    pub feedback_included: Option<String>,

    #[serde(default)]
    pub feedback_missed: Option<String>,

    #[serde(default)]
    pub feedback_included_word: FeedbackWord,

    #[serde(default)]
    pub feedback_missed_word: FeedbackWord,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            points: default_points(),
            occurrences: default_occurrences(),
            case_sensitive: true,
            forgive_mistakes: false,
            feedback_included: None,
            feedback_missed: None,
            feedback_included_word: FeedbackWord::None,
            feedback_missed_word: FeedbackWord::None,
        }
    }
}

fn default_points() -> f64 {
    1.0
}

fn default_occurrences() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// Which word is shown in front of a feedback text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackWord {
    /// Nothing; the feedback stands alone
    #[default]
    None,
    /// The group's primary keyword
    Keyword,
    /// The alternative that matched first
    Alternative,
    /// The text the learner actually wrote
    Answer,
}

/// Task-wide override of a per-group flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Override {
    /// Force the flag on for every group
    On,
    /// Force the flag off for every group
    Off,
    /// Use each group's own setting
    #[default]
    #[serde(alias = "auto")]
    Default,
}

impl Override {
    /// Resolve the effective flag for one group
    pub fn resolve(self, group_flag: bool) -> bool {
        self != Override::Off && (self == Override::On || group_flag)
    }
}

/// Task-wide behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviourConfig {
    /// Score needed to pass, in percent of the theoretical maximum
    #[serde(default)]
    pub percentage_passing: Option<f64>,

    /// Score needed for mastery, in percent of the theoretical maximum
    #[serde(default)]
    pub percentage_mastery: Option<f64>,

    #[serde(default)]
    pub override_case_sensitive: Override,

    #[serde(default)]
    pub override_forgive_mistakes: Override,

    /// Replacement for line breaks before matching
    #[serde(default = "default_linebreak_replacement")]
    pub linebreak_replacement: String,

    /// Characters required before an answer can be checked
    #[serde(default)]
    pub minimum_length: Option<usize>,

    /// Characters beyond which the answer is cut off
    #[serde(default)]
    pub maximum_length: Option<usize>,

    /// Report no score at all
    #[serde(default)]
    pub ignore_scoring: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            percentage_passing: None,
            percentage_mastery: None,
            override_case_sensitive: Override::Default,
            override_forgive_mistakes: Override::Default,
            linebreak_replacement: default_linebreak_replacement(),
            minimum_length: None,
            maximum_length: None,
            ignore_scoring: false,
        }
    }
}

fn default_linebreak_replacement() -> String {
    " ".to_string()
}

/// Overall feedback for a score percentage range (inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRange {
    #[serde(default)]
    pub from: f64,

    #[serde(default = "default_range_to")]
    pub to: f64,

    #[serde(default)]
    pub feedback: Option<String>,
}

fn default_range_to() -> f64 {
    100.0
}

/// Sample solution shown after checking
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SolutionConfig {
    #[serde(default)]
    pub introduction: Option<String>,

    #[serde(default)]
    pub sample: Option<String>,
}

impl SolutionConfig {
    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        [&self.introduction, &self.sample]
            .iter()
            .all(|text| text.as_deref().is_none_or(|t| t.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_resolution() {
        assert!(Override::On.resolve(false));
        assert!(!Override::Off.resolve(true));
        assert!(Override::Default.resolve(true));
        assert!(!Override::Default.resolve(false));
    }

    #[test]
    fn test_option_defaults_from_json() {
        let group: KeywordGroup = serde_json::from_str(r#"{"keyword": "H5P"}"#).unwrap();
        assert_eq!(group.options.points, 1.0);
        assert_eq!(group.options.occurrences, 1);
        assert!(group.options.case_sensitive);
        assert!(!group.options.forgive_mistakes);
        assert_eq!(group.options.feedback_included_word, FeedbackWord::None);
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{
            "keywords": [{
                "keyword": "cat",
                "alternatives": ["feline"],
                "options": {"points": 2, "occurrences": 3, "caseSensitive": false,
                            "forgiveMistakes": true, "feedbackIncludedWord": "answer"}
            }],
            "behaviour": {"overrideCaseSensitive": "on", "percentageMastery": 80}
        }"#;
        let task: TaskConfig = serde_json::from_str(json).unwrap();
        let options = &task.keywords[0].options;
        assert_eq!(options.points, 2.0);
        assert!(!options.case_sensitive);
        assert!(options.forgive_mistakes);
        assert_eq!(options.feedback_included_word, FeedbackWord::Answer);
        assert_eq!(task.behaviour.override_case_sensitive, Override::On);
        assert_eq!(task.behaviour.percentage_mastery, Some(80.0));
        assert_eq!(task.behaviour.linebreak_replacement, " ");
    }

    #[test]
    fn test_solution_is_empty() {
        assert!(SolutionConfig::default().is_empty());
        let blank = SolutionConfig {
            introduction: Some("  ".into()),
            sample: None,
        };
        assert!(blank.is_empty());

        let task: TaskConfig =
            serde_json::from_str(r#"{"solution": {"sample": "Plants make sugar from light."}}"#).unwrap();
        assert!(!task.solution.is_empty());
        assert_eq!(task.solution.introduction, None);
    }

    #[test]
    fn test_theoretical_max_skips_groups_without_keyword() {
        let task = TaskConfig {
            keywords: vec![
                KeywordGroup::new("a").with_options(KeywordOptions {
                    points: 2.0,
                    occurrences: 3,
                    ..KeywordOptions::default()
                }),
                KeywordGroup::default(),
            ],
            ..TaskConfig::default()
        };
        assert_eq!(task.theoretical_max(), 6.0);
    }
}
