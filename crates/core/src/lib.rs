//! Core types for the essay scoring tools
//!
//! This crate provides shared functionality used by the matching engine and
//! the command-line front end:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: task files (TOML or JSON) describing keyword groups
//!   and scoring behaviour
//! - **Validation**: load-time checks that catch authoring mistakes
//! - **Text**: HTML decoding and `/regex/` detection for authored phrases
//!
//! # Example
//!
//! ```rust,no_run
//! use essay_core::{config::Task, validation::validate_task};
//!
//! let task = Task::load(Some("essay-task.toml")).expect("Task file missing");
//! let report = validate_task(&task.schema);
//!
//! if !report.is_valid() {
//!     eprintln!("Task has authoring errors!");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod text;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        BehaviourConfig, FeedbackRange, FeedbackWord, KeywordGroup, KeywordOptions, Override,
        Task, TaskConfig,
    };
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{validate_task, ValidationResult, Validator};
}
