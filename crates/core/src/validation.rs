//! Authoring validation for task configurations
//!
//! Problems found here are mistakes of the task author, never of the learner,
//! so they are reported when a task is loaded rather than while scoring.
//!
//! # Example
//!
//! ```rust,ignore
//! use essay_core::validation::validate_task;
//!
//! let result = validate_task(&task.schema);
//! if !result.is_valid() {
//!     for error in result.errors() {
//!         eprintln!("Validation error: {}", error);
//!     }
//! }
//! ```

use crate::config::{FeedbackWord, TaskConfig};
use crate::error::{Error, ErrorCode, Result};
use crate::text::{decode_html, regex_literal_body};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a regular expression compiles
    pub fn compiles(mut self, field: &str, pattern: &str) -> Self {
        if let Err(err) = Regex::new(pattern) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Invalid regular expression: {}", err),
                code: "MALFORMED_PATTERN".to_string(),
                expected: Some("valid regular expression".to_string()),
                actual: Some(pattern.to_string()),
            });
        }
        self
    }

    /// Add a custom validation
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Validate a whole task configuration
pub fn validate_task(task: &TaskConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, group) in task.keywords.iter().enumerate() {
        let prefix = format!("keywords[{}]", i);
        let options = &group.options;

        let mut validator = Validator::new()
            .warn_if(
                &format!("{}.keyword", prefix),
                !group.has_keyword(),
                "Group has no keyword and will not be scored",
            )
            .custom(&format!("{}.options.points", prefix), || {
                (!options.points.is_finite() || options.points < 0.0)
                    .then(|| format!("Points must be a non-negative number, got {}", options.points))
            })
            .custom(&format!("{}.options.occurrences", prefix), || {
                (options.occurrences == 0).then(|| "Occurrences must be at least 1".to_string())
            })
            .warn_if(
                &format!("{}.options.feedbackMissedWord", prefix),
                matches!(
                    options.feedback_missed_word,
                    FeedbackWord::Alternative | FeedbackWord::Answer
                ),
                "Missed feedback can only show the keyword; the setting will be ignored",
            );

        if let Some(keyword) = group.keyword.as_deref() {
            let decoded = decode_html(keyword);
            if let Some(body) = regex_literal_body(&decoded) {
                validator = validator.compiles(&format!("{}.keyword", prefix), body);
            }
        }

        for (j, alternative) in group.alternatives.iter().enumerate() {
            let field = format!("{}.alternatives[{}]", prefix, j);
            let decoded = decode_html(alternative);
            validator = validator.warn_if(&field, decoded.is_empty(), "Empty alternative is ignored");
            if let Some(body) = regex_literal_body(&decoded) {
                validator = validator.compiles(&field, body);
            }
        }

        result.merge(validator.validate());
    }

    let behaviour = &task.behaviour;
    let mut validator = Validator::new().warn_if(
        "keywords",
        task.theoretical_max() <= 0.0,
        "No points can be earned; every answer scores 0",
    );

    if let Some(passing) = behaviour.percentage_passing {
        validator = validator.range("behaviour.percentagePassing", passing, 0.0, 100.0);
    }
    if let Some(mastery) = behaviour.percentage_mastery {
        validator = validator.range("behaviour.percentageMastery", mastery, 0.0, 100.0);
    }
    if let (Some(passing), Some(mastery)) = (behaviour.percentage_passing, behaviour.percentage_mastery) {
        validator = validator.warn_if(
            "behaviour.percentagePassing",
            passing > mastery,
            "Passing threshold is above mastery threshold; passing requires full mastery",
        );
    }
    if let (Some(min), Some(max)) = (behaviour.minimum_length, behaviour.maximum_length) {
        validator = validator.custom("behaviour.minimumLength", || {
            (min > max).then(|| format!("Minimum length {} exceeds maximum length {}", min, max))
        });
    }

    for (i, range) in task.overall_feedback.iter().enumerate() {
        let field = format!("overallFeedback[{}]", i);
        validator = validator
            .range(&format!("{}.from", field), range.from, 0.0, 100.0)
            .range(&format!("{}.to", field), range.to, 0.0, 100.0)
            .custom(&field, || {
                (range.from > range.to)
                    .then(|| format!("Range start {} is after range end {}", range.from, range.to))
            });
    }

    result.merge(validator.validate());
    result
}
