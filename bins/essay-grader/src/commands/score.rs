//! Single answer scoring command

use super::{evaluate_timed, keyword_labels, load_scorer};
use anyhow::Result;
use essay_cli::output::Status;
use essay_cli::report::{print_evaluation, print_matches};
use essay_core::error::{exit_codes, Error, ResultExt};
use essay_matching::{Evaluation, MatchError};
use essay_telemetry::Event;
use std::path::PathBuf;

/// Where the answer comes from
pub enum AnswerInput {
    File(PathBuf),
    Text(String),
}

impl AnswerInput {
    fn read(&self) -> essay_core::Result<String> {
        match self {
            AnswerInput::File(path) => std::fs::read_to_string(path)
                .map_err(Error::from)
                .context(format!("Reading answer {}", path.display())),
            AnswerInput::Text(text) => Ok(text.clone()),
        }
    }

    fn label(&self) -> String {
        match self {
            AnswerInput::File(path) => path.display().to_string(),
            AnswerInput::Text(_) => "<inline>".to_string(),
        }
    }
}

/// Score one answer and print the result
pub fn run(
    task_path: Option<&str>,
    input: AnswerInput,
    json: bool,
    show_matches: bool,
    fail_under_pass: bool,
) -> Result<i32> {
    let (task, scorer) = load_scorer(task_path)?;
    let answer = input.read()?;

    let evaluation = match evaluate_timed(&scorer, &answer) {
        Ok(evaluation) => evaluation,
        Err(MatchError::AnswerTooShort { actual, required }) => {
            Status::error(&format!(
                "Answer has {} characters, at least {} are required",
                actual, required
            ));
            return Ok(exit_codes::FAILURE);
        }
        Err(e) => return Err(Error::from(e).into()),
    };

    Event::answer_scored(
        &input.label(),
        evaluation.score,
        evaluation.max_score,
        evaluation.passed,
    )
    .log();

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(&evaluation, task.schema.title.as_deref());
        if show_matches {
            println!();
            print_matches(&evaluation, &keyword_labels(&scorer));
        }
    }

    Ok(exit_code(&evaluation, fail_under_pass))
}

/// Exit code for a scored answer
pub(crate) fn exit_code(evaluation: &Evaluation, fail_under_pass: bool) -> i32 {
    if fail_under_pass && evaluation.passed == Some(false) {
        exit_codes::NOT_PASSED
    } else {
        exit_codes::SUCCESS
    }
}
