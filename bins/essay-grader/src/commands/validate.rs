//! Task validation command

use anyhow::Result;
use essay_cli::output::{format_count, format_points, Status};
use essay_cli::report::print_validation;
use essay_core::config::Task;
use essay_core::error::exit_codes;
use essay_core::validation::validate_task;
use essay_matching::Scorer;

/// Check a task file and report authoring errors and warnings
pub fn run(task_path: Option<&str>) -> Result<i32> {
    let task = Task::load(task_path)?;
    let location = task.path.as_deref().unwrap_or("task");

    Status::info(&format!("Checking {}", location));
    let code = print_validation(&validate_task(&task.schema));
    if code != exit_codes::SUCCESS {
        return Ok(code);
    }

    let scorer = Scorer::new(&task.schema).map_err(essay_core::Error::from)?;
    println!(
        "  {} scored, theoretical maximum {}, maximum score {}",
        format_count(scorer.groups().len(), "keyword group", "keyword groups"),
        format_points(scorer.theoretical_max()),
        format_points(scorer.max_score()),
    );

    Ok(exit_codes::SUCCESS)
}
