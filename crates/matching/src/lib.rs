//! Keyword matching and scoring for free-text essay answers.
//!
//! This crate provides:
//! - Exact, `*` wildcard and approximate keyword detection
//! - Damerau-Levenshtein and Jaro-Winkler string similarity
//! - Word isolation checks against configurable delimiters
//! - Scoring with per-group occurrence caps and feedback
//!
//! # Example
//!
//! ```rust
//! use essay_core::config::{KeywordGroup, TaskConfig};
//! use essay_matching::Scorer;
//!
//! let task = TaskConfig {
//!     keywords: vec![KeywordGroup::new("H5P").with_alternatives(["H five P"])],
//!     ..TaskConfig::default()
//! };
//!
//! let scorer = Scorer::new(&task).unwrap();
//! let evaluation = scorer.evaluate("I used H5P today").unwrap();
//! assert_eq!(evaluation.score, 1.0);
//! ```

mod alternative;
mod answer;
mod detect;
mod error;
mod isolation;
mod merge;
mod scoring;
mod similarity;

#[cfg(feature = "wasm")]
mod wasm;

pub use alternative::{Alternative, AlternativeSet};
pub use essay_core::text::decode_html;
pub use answer::AnswerText;
pub use detect::{
    contains, detect_exact, detect_fuzzy, detect_pattern, detect_wildcard, wildcard_regex, Match,
    WILDCARD_CHARS,
};
pub use error::{MatchError, Result};
pub use isolation::{is_isolated, Delimiters, DEFAULT_DELIMITERS};
pub use merge::merge_matches;
pub use scoring::{
    build_explanations, compute_score, Evaluation, Explanation, ResultSet, Scorer,
};
pub use similarity::{are_similar, fuzzy_find, jaro_winkler, levenshtein};
