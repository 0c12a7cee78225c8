//! Error types for the matching crate.

use thiserror::Error;

/// Result type alias for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while matching or scoring.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A `/regex/` alternative or a delimiter pattern that does not compile
    #[error("Malformed pattern /{pattern}/: {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Answer is shorter than the task's minimum length
    #[error("Answer has {actual} characters, at least {required} are required")]
    AnswerTooShort { actual: usize, required: usize },
}

impl From<MatchError> for essay_core::Error {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::MalformedPattern { pattern, source } => {
                essay_core::Error::malformed_pattern(&pattern, &source).with_source(source)
            }
            MatchError::AnswerTooShort { actual, required } => essay_core::Error::invalid_input(
                format!("Answer has {} characters, at least {} are required", actual, required),
            )
            .with_suggestion("Write a longer answer before checking it"),
        }
    }
}
