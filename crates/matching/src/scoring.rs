//! Scoring of a free-text answer against a task's keyword groups.
//!
//! A [`Scorer`] is built once per task. Each evaluation then runs the three
//! detectors for every alternative of every keyword group, merges their
//! results, caps the counts per group and turns them into a score and
//! per-group explanations. Nothing is cached between evaluations.

use crate::alternative::{Alternative, AlternativeSet};
use crate::answer::AnswerText;
use crate::detect::{detect_exact, detect_fuzzy, detect_pattern, wildcard_regex, Match};
use crate::error::{MatchError, Result};
use crate::isolation::Delimiters;
use crate::merge::merge_matches;
use essay_core::config::{
    BehaviourConfig, FeedbackRange, FeedbackWord, KeywordGroup, SolutionConfig, TaskConfig,
};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Matches found per keyword group, in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    groups: Vec<Vec<Match>>,
}

impl ResultSet {
    /// Wrap per-group match lists.
    pub fn new(groups: Vec<Vec<Match>>) -> Self {
        Self { groups }
    }

    /// Matches of every group.
    pub fn groups(&self) -> &[Vec<Match>] {
        &self.groups
    }

    /// Number of matches per group, before capping.
    pub fn counts(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Feedback line for one keyword group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Word shown in front of the text; `None` when nothing is shown
    pub correct: Option<String>,
    pub text: String,
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub score: f64,
    pub max_score: f64,
    pub passing_score: f64,
    /// `None` when the task ignores scoring
    pub passed: Option<bool>,
    /// Score in percent of the maximum score
    pub percentage: f64,
    pub matches: ResultSet,
    pub explanations: Vec<Explanation>,
    pub overall_feedback: Option<String>,
    /// Sample solution of the task, if one is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<SolutionConfig>,
    pub answer_length: usize,
    pub truncated: bool,
}

impl Evaluation {
    /// Score as whole points, the way score bars and reports show it.
    pub fn rounded_score(&self) -> f64 {
        self.score.round()
    }
}

/// Sum of capped matches times points over all groups.
///
/// `groups` must be aligned with the result set; surplus entries on either
/// side are ignored.
pub fn compute_score(results: &ResultSet, groups: &[KeywordGroup]) -> f64 {
    results
        .groups()
        .iter()
        .zip(groups)
        .map(|(matches, group)| {
            let counted = matches.len().min(group.options.occurrences as usize);
            counted as f64 * group.options.points
        })
        .sum()
}

/// Build feedback lines for groups that have feedback configured.
///
/// Groups without matches get their "missed" feedback, the others their
/// "included" feedback. Lines showing a word come before those that do not;
/// order is kept otherwise.
pub fn build_explanations(results: &ResultSet, groups: &[KeywordGroup]) -> Vec<Explanation> {
    let mut explanations = Vec::new();

    for (matches, group) in results.groups().iter().zip(groups) {
        let options = &group.options;

        match matches.first() {
            None => {
                if let Some(text) = non_empty(options.feedback_missed.as_deref()) {
                    let correct = match options.feedback_missed_word {
                        FeedbackWord::Keyword => group.keyword.clone(),
                        _ => None,
                    };
                    explanations.push(Explanation {
                        correct,
                        text: text.to_string(),
                    });
                }
            }
            Some(first) => {
                if let Some(text) = non_empty(options.feedback_included.as_deref()) {
                    let correct = match options.feedback_included_word {
                        FeedbackWord::Keyword => group.keyword.clone(),
                        FeedbackWord::Alternative => Some(first.keyword.clone()),
                        FeedbackWord::Answer => Some(first.matched.clone()),
                        FeedbackWord::None => None,
                    };
                    explanations.push(Explanation {
                        correct,
                        text: text.to_string(),
                    });
                }
            }
        }
    }

    explanations.sort_by_key(|explanation| explanation.correct.is_none());
    explanations
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// A phrase to search for, adjusted to the group's case handling.
#[derive(Debug, Clone)]
struct Needle {
    alternative: Alternative,
    wildcard: Option<Regex>,
}

impl Needle {
    fn new(alternative: &Alternative, case_sensitive: bool) -> Result<Self> {
        let alternative = if case_sensitive {
            alternative.clone()
        } else {
            alternative.to_lowercase()
        };
        let wildcard = if alternative.has_wildcard() {
            Some(wildcard_regex(alternative.text(), case_sensitive)?)
        } else {
            None
        };
        Ok(Self {
            alternative,
            wildcard,
        })
    }
}

#[derive(Debug, Clone)]
struct ScoredGroup {
    alternatives: AlternativeSet,
    needles: Vec<Needle>,
    case_sensitive: bool,
    forgive_mistakes: bool,
}

impl ScoredGroup {
    fn find_matches(&self, answer: &str, delimiters: &Delimiters) -> Vec<Match> {
        let haystack = if self.case_sensitive {
            answer.to_string()
        } else {
            answer.to_lowercase()
        };

        let extracted: Vec<Needle> = self
            .alternatives
            .extract(answer)
            .iter()
            .map(|alternative| Needle {
                alternative: if self.case_sensitive {
                    alternative.clone()
                } else {
                    alternative.to_lowercase()
                },
                wildcard: None,
            })
            .collect();

        let mut matches = Vec::new();
        for needle in self.needles.iter().chain(&extracted) {
            let text = needle.alternative.text();
            let exact = detect_exact(&needle.alternative.exact_text(), &haystack, delimiters);
            let wildcard = needle
                .wildcard
                .as_ref()
                .map(|regex| detect_pattern(regex, text, &haystack, delimiters))
                .unwrap_or_default();
            let fuzzy = if self.forgive_mistakes {
                detect_fuzzy(text, &haystack, delimiters)
            } else {
                Vec::new()
            };
            matches.extend(merge_matches([exact, wildcard, fuzzy]));
        }
        matches
    }
}

/// Scores answers for one task.
#[derive(Debug, Clone)]
pub struct Scorer {
    configs: Vec<KeywordGroup>,
    groups: Vec<ScoredGroup>,
    behaviour: BehaviourConfig,
    overall_feedback: Vec<FeedbackRange>,
    solution: Option<SolutionConfig>,
    delimiters: Delimiters,
}

impl Scorer {
    /// Prepare a task for scoring.
    ///
    /// Groups without a keyword are dropped. Regex alternatives are compiled
    /// here, so a malformed one fails construction instead of a later check.
    pub fn new(task: &TaskConfig) -> Result<Self> {
        let behaviour = task.behaviour.clone();
        let mut configs = Vec::new();
        let mut groups = Vec::new();

        for (i, group) in task.keywords.iter().enumerate() {
            let Some(keyword) = group.keyword.as_deref() else {
                warn!(group = i, "keyword group without keyword is not scored");
                continue;
            };

            let case_sensitive = behaviour
                .override_case_sensitive
                .resolve(group.options.case_sensitive);
            let forgive_mistakes = behaviour
                .override_forgive_mistakes
                .resolve(group.options.forgive_mistakes);

            let alternatives = AlternativeSet::new(keyword, &group.alternatives, case_sensitive)?;
            let needles = alternatives
                .literals()
                .iter()
                .map(|alternative| Needle::new(alternative, case_sensitive))
                .collect::<Result<Vec<_>>>()?;

            configs.push(group.clone());
            groups.push(ScoredGroup {
                alternatives,
                needles,
                case_sensitive,
                forgive_mistakes,
            });
        }

        debug!(groups = groups.len(), "scorer prepared");

        Ok(Self {
            configs,
            groups,
            behaviour,
            overall_feedback: task.overall_feedback.clone(),
            solution: (!task.solution.is_empty()).then(|| task.solution.clone()),
            delimiters: Delimiters::default(),
        })
    }

    /// Use a different set of word delimiters.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Keyword groups that are scored, in order.
    pub fn groups(&self) -> &[KeywordGroup] {
        &self.configs
    }

    /// Highest score the keyword groups allow.
    pub fn theoretical_max(&self) -> f64 {
        self.configs
            .iter()
            .map(|group| group.options.points * f64::from(group.options.occurrences))
            .sum()
    }

    /// Score reported as the maximum: the mastery threshold, at least 1.
    pub fn max_score(&self) -> f64 {
        if self.behaviour.ignore_scoring {
            return 0.0;
        }
        let theoretical = self.theoretical_max();
        let mastery = self
            .behaviour
            .percentage_mastery
            .map_or(theoretical, |percentage| percentage * theoretical / 100.0);
        mastery.max(1.0)
    }

    /// Score needed to pass; the maximum score unless a percentage is configured.
    pub fn passing_score(&self) -> f64 {
        let max_score = self.max_score();
        self.behaviour
            .percentage_passing
            .map_or(max_score, |percentage| percentage * self.theoretical_max() / 100.0)
            .min(max_score)
    }

    /// Reject answers shorter than the configured minimum length.
    pub fn check_length(&self, answer: &AnswerText) -> Result<()> {
        match self.behaviour.minimum_length {
            Some(required) if answer.len() < required => Err(MatchError::AnswerTooShort {
                actual: answer.len(),
                required,
            }),
            _ => Ok(()),
        }
    }

    /// Find the matches of every keyword group in a prepared answer.
    #[instrument(skip_all, fields(groups = self.groups.len(), answer_len = answer.len()))]
    pub fn compute_results(&self, answer: &str) -> ResultSet {
        let groups = self
            .groups
            .iter()
            .zip(&self.configs)
            .map(|(group, config)| {
                let matches = group.find_matches(answer, &self.delimiters);
                debug!(
                    keyword = config.keyword.as_deref().unwrap_or_default(),
                    matches = matches.len(),
                    "keyword group checked"
                );
                matches
            })
            .collect();
        ResultSet::new(groups)
    }

    /// Raw score of a result set; not capped by the maximum score.
    pub fn compute_score(&self, results: &ResultSet) -> f64 {
        compute_score(results, &self.configs)
    }

    /// Feedback lines for a result set.
    pub fn build_explanations(&self, results: &ResultSet) -> Vec<Explanation> {
        build_explanations(results, &self.configs)
    }

    /// Check a raw answer: prepare it, match it and score it.
    pub fn evaluate(&self, raw_answer: &str) -> Result<Evaluation> {
        let answer = AnswerText::prepare(raw_answer, &self.behaviour);
        self.check_length(&answer)?;

        let results = self.compute_results(answer.as_str());
        let explanations = self.build_explanations(&results);
        let max_score = self.max_score();

        let (score, passing_score, passed) = if self.behaviour.ignore_scoring {
            (0.0, 0.0, None)
        } else {
            let score = self.compute_score(&results).clamp(0.0, max_score);
            let passing_score = self.passing_score();
            (score, passing_score, Some(score >= passing_score))
        };

        let percentage = if max_score > 0.0 {
            score / max_score * 100.0
        } else {
            0.0
        };

        debug!(score, max_score, "answer evaluated");

        Ok(Evaluation {
            score,
            max_score,
            passing_score,
            passed,
            percentage,
            overall_feedback: self.overall_feedback_for(percentage),
            solution: self.solution.clone(),
            matches: results,
            explanations,
            answer_length: answer.len(),
            truncated: answer.was_truncated(),
        })
    }

    /// Overall feedback text for a score percentage.
    pub fn overall_feedback_for(&self, percentage: f64) -> Option<String> {
        let rounded = percentage.round();
        self.overall_feedback
            .iter()
            .find(|range| range.from <= rounded && rounded <= range.to)
            .and_then(|range| non_empty(range.feedback.as_deref()))
            .map(String::from)
    }
}
