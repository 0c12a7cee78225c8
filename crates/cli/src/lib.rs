//! CLI utilities for the essay scoring tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Progress indicators
//! - Human-readable reports of evaluations and task validation

#![warn(missing_docs)]

pub mod output;
pub mod progress;
pub mod report;
