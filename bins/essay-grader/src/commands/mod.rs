//! CLI command implementations

pub mod batch;
pub mod compare;
pub mod score;
pub mod validate;

use anyhow::Result;
use essay_core::config::Task;
use essay_core::error::{exit_codes, Error, ErrorCode};
use essay_core::validation::validate_task;
use essay_matching::{Evaluation, MatchError, Scorer};
use essay_telemetry::{metrics, names, Timer};

/// Load a task, refuse it when it has authoring errors, and prepare it for scoring
pub(crate) fn load_scorer(task_path: Option<&str>) -> Result<(Task, Scorer)> {
    let task = Task::load(task_path)?;

    let validation = validate_task(&task.schema);
    for warning in validation.warnings() {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }
    validation.to_result()?;

    let scorer = Scorer::new(&task.schema).map_err(Error::from)?;
    metrics().gauge(names::TASK_GROUPS, scorer.groups().len() as u64);
    tracing::debug!(
        path = task.path.as_deref().unwrap_or("<memory>"),
        groups = scorer.groups().len(),
        "task loaded"
    );

    Ok((task, scorer))
}

/// Evaluate one answer and record the pass in the metrics registry
pub(crate) fn evaluate_timed(scorer: &Scorer, answer: &str) -> std::result::Result<Evaluation, MatchError> {
    let timer = Timer::start(names::SCORING_DURATION_MS);
    let evaluation = scorer.evaluate(answer);
    timer.stop();

    match &evaluation {
        Ok(evaluation) => {
            metrics().increment(names::SCORING_PASSES);
            if evaluation.passed == Some(true) {
                metrics().increment(names::ANSWERS_PASSED);
            }
        }
        Err(_) => metrics().increment(names::SCORING_FAILURES),
    }
    evaluation
}

/// Primary keyword of every scored group, for listings
pub(crate) fn keyword_labels(scorer: &Scorer) -> Vec<String> {
    scorer
        .groups()
        .iter()
        .map(|group| group.keyword.clone().unwrap_or_default())
        .collect()
}

/// Exit code for an error that ended a command
pub(crate) fn exit_code_for(err: &anyhow::Error) -> i32 {
    let Some(err) = err.downcast_ref::<Error>() else {
        return exit_codes::FAILURE;
    };

    match err.code {
        ErrorCode::ConfigValidationError | ErrorCode::MalformedPattern => exit_codes::VALIDATION_ERROR,
        code if code.category() == "Configuration" => exit_codes::CONFIG_ERROR,
        _ => exit_codes::FAILURE,
    }
}
