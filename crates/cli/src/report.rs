//! Human-readable reports
//!
//! Rendering of evaluations, task validation results and batch summaries.

use crate::output::{format_count, format_points, format_score, score_bar, Status};
use essay_core::config::SolutionConfig;
use essay_core::error::exit_codes;
use essay_core::text::decode_html;
use essay_core::validation::ValidationResult;
use essay_matching::{Evaluation, Explanation};
use owo_colors::OwoColorize;
use serde::Serialize;

const BAR_WIDTH: usize = 20;

/// Print one evaluation to stdout
pub fn print_evaluation(evaluation: &Evaluation, title: Option<&str>) {
    if let Some(title) = title {
        Status::header(title);
    }

    match evaluation.passed {
        None => println!("{} scoring disabled for this task", "ℹ".blue()),
        Some(passed) => {
            let verdict = if passed {
                "PASSED".green().bold().to_string()
            } else {
                "NOT PASSED".red().bold().to_string()
            };
            println!(
                "{} {} {} ({:.0}%)",
                verdict,
                score_bar(evaluation.score, evaluation.max_score, BAR_WIDTH).cyan(),
                format_score(evaluation.rounded_score(), evaluation.max_score),
                evaluation.percentage,
            );
            println!(
                "  {}",
                format!("passing score: {}", format_points(evaluation.passing_score)).dimmed()
            );
        }
    }

    if evaluation.truncated {
        Status::warning(&format!(
            "Answer was cut off at {} characters",
            evaluation.answer_length
        ));
    }

    if !evaluation.explanations.is_empty() {
        println!();
        for explanation in &evaluation.explanations {
            println!("  {}", format_explanation(explanation));
        }
    }

    if let Some(feedback) = &evaluation.overall_feedback {
        println!();
        println!("{}", feedback.italic());
    }

    if let Some(solution) = &evaluation.solution {
        Status::header("Sample solution");
        for line in solution_lines(solution) {
            println!("  {}", line);
        }
    }
}

/// Display lines of a sample solution, introduction first
///
/// Both parts are authored as rich text; markup is dropped.
pub fn solution_lines(solution: &SolutionConfig) -> Vec<String> {
    [&solution.introduction, &solution.sample]
        .into_iter()
        .flatten()
        .flat_map(|text| {
            decode_html(text)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Print every match found, grouped by keyword group
pub fn print_matches(evaluation: &Evaluation, keywords: &[String]) {
    for (group, keyword) in evaluation.matches.groups().iter().zip(keywords) {
        let found = format_count(group.len(), "match", "matches");
        println!("  {} {}", keyword.bold(), format!("({})", found).dimmed());
        for found in group {
            println!(
                "    {} {} {}",
                format!("@{}", found.index).dimmed(),
                found.matched,
                format!("≈ {}", found.keyword).dimmed()
            );
        }
    }
}

/// One explanation as a display line
pub fn format_explanation(explanation: &Explanation) -> String {
    match &explanation.correct {
        Some(word) => format!("{} {}", word.bold(), explanation.text),
        None => explanation.text.clone(),
    }
}

/// Print validation problems and return the matching exit code
pub fn print_validation(result: &ValidationResult) -> i32 {
    for warning in result.warnings() {
        Status::warning(&warning.to_string());
    }

    if result.is_valid() {
        Status::success("Task is valid");
        return exit_codes::SUCCESS;
    }

    eprintln!(
        "{} Found {}:",
        "ERROR".red(),
        format_count(result.errors().len(), "authoring error", "authoring errors")
    );
    for error in result.errors() {
        eprintln!("  - {}", error);
    }

    exit_codes::VALIDATION_ERROR
}

/// Totals over a batch of answers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Answers that were scored
    pub scored: usize,
    /// Answers that could not be scored
    pub failed: usize,
    /// Scored answers that reached the passing score
    pub passed: usize,
    /// Mean score of the scored answers
    pub mean_score: f64,
}

impl BatchSummary {
    /// Summarize the evaluations of a batch; `failed` counts the unreadable answers
    pub fn from_evaluations<'a, I>(evaluations: I, failed: usize) -> Self
    where
        I: IntoIterator<Item = &'a Evaluation>,
    {
        let mut summary = Self {
            failed,
            ..Self::default()
        };
        let mut total = 0.0;

        for evaluation in evaluations {
            summary.scored += 1;
            total += evaluation.score;
            if evaluation.passed == Some(true) {
                summary.passed += 1;
            }
        }

        if summary.scored > 0 {
            summary.mean_score = total / summary.scored as f64;
        }
        summary
    }
}

/// Print the totals of a batch run
pub fn print_batch_summary(summary: &BatchSummary) {
    Status::header("Summary");
    println!("  {}", format_count(summary.scored, "answer scored", "answers scored"));
    println!("  {} passed", summary.passed.to_string().green());
    println!("  mean score {}", format_points(summary.mean_score));
    if summary.failed > 0 {
        Status::warning(&format_count(summary.failed, "answer failed", "answers failed"));
    }
}
