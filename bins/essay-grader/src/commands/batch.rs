//! Batch scoring command

use super::{evaluate_timed, load_scorer};
use anyhow::Result;
use essay_cli::output::{format_count, format_duration, format_score, Status};
use essay_cli::progress::{file_progress, finish_error, finish_success};
use essay_cli::report::{print_batch_summary, BatchSummary};
use essay_core::error::{exit_codes, Error};
use essay_matching::{Evaluation, Scorer};
use essay_telemetry::Event;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Outcome for one answer file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<Evaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    answers: Vec<AnswerReport>,
    summary: BatchSummary,
}

/// Answer files below `dir` with the given extension, in path order
pub(crate) fn collect_answers(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let ext = ext.trim_start_matches('.');
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .is_some_and(|x| x.eq_ignore_ascii_case(ext))
        })
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}

fn score_file(scorer: &Scorer, path: &Path) -> AnswerReport {
    let result = std::fs::read_to_string(path)
        .map_err(|e| Error::from(e).to_string())
        .and_then(|answer| evaluate_timed(scorer, &answer).map_err(|e| e.to_string()));

    let path = path.display().to_string();
    match result {
        Ok(evaluation) => {
            Event::answer_scored(&path, evaluation.score, evaluation.max_score, evaluation.passed).log();
            AnswerReport {
                path,
                evaluation: Some(evaluation),
                error: None,
            }
        }
        Err(error) => {
            tracing::warn!(path = %path, %error, "answer not scored");
            AnswerReport {
                path,
                evaluation: None,
                error: Some(error),
            }
        }
    }
}

fn score_all(scorer: &Scorer, paths: &[PathBuf], pb: &ProgressBar) -> Vec<AnswerReport> {
    essay_telemetry::timed_span!("batch.duration_ms", answers = paths.len());
    paths
        .par_iter()
        .map(|path| {
            let report = score_file(scorer, path);
            pb.inc(1);
            report
        })
        .collect()
}

/// Score every answer file in a directory
pub fn run(
    task_path: Option<&str>,
    dir: &Path,
    ext: &str,
    json: bool,
    fail_under_pass: bool,
) -> Result<i32> {
    if !dir.is_dir() {
        return Err(Error::file_not_found(dir)
            .with_suggestion("Pass a directory holding one answer per file")
            .into());
    }

    let (_task, scorer) = load_scorer(task_path)?;
    let paths = collect_answers(dir, ext);
    if paths.is_empty() {
        Status::warning(&format!("No .{} files found in {}", ext, dir.display()));
        return Ok(exit_codes::SUCCESS);
    }

    let started = Instant::now();
    let pb = file_progress(paths.len() as u64, json);
    let reports = score_all(&scorer, &paths, &pb);

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    let summary = BatchSummary::from_evaluations(
        reports.iter().filter_map(|r| r.evaluation.as_ref()),
        failed,
    );

    let message = format!(
        "{} in {}",
        format_count(summary.scored, "answer", "answers"),
        format_duration(started.elapsed())
    );
    if failed == 0 {
        finish_success(&pb, &message);
    } else {
        finish_error(&pb, &message);
    }

    let any_not_passed = reports
        .iter()
        .filter_map(|r| r.evaluation.as_ref())
        .any(|e| e.passed == Some(false));

    if json {
        let report = BatchReport {
            answers: reports,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for report in &reports {
            print_line(report);
        }
        print_batch_summary(&summary);
    }

    if failed > 0 {
        Ok(exit_codes::FAILURE)
    } else if fail_under_pass && any_not_passed {
        Ok(exit_codes::NOT_PASSED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn print_line(report: &AnswerReport) {
    match (&report.evaluation, &report.error) {
        (Some(evaluation), _) => {
            let verdict = match evaluation.passed {
                Some(true) => "pass".green().to_string(),
                Some(false) => "fail".red().to_string(),
                None => "-".dimmed().to_string(),
            };
            println!(
                "  {:<6} {:>8}  {}",
                verdict,
                format_score(evaluation.rounded_score(), evaluation.max_score),
                report.path
            );
        }
        (None, Some(error)) => {
            println!("  {:<6} {:>8}  {} {}", "error".red().to_string(), "", report.path, error.dimmed());
        }
        (None, None) => {}
    }
}
