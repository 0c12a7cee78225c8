//! WASM bindings for answer checking.

use essay_core::config::TaskConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_json(message: impl ToString) -> String {
    let response = ErrorResponse {
        error: message.to_string(),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
}

/// Check an answer against a task.
///
/// # Arguments
/// * `task_json` - Task configuration in the authoring tool's JSON format
/// * `answer` - The learner's answer
///
/// # Returns
/// The evaluation as JSON, or `{"error": "..."}` when the task cannot be
/// read or the answer cannot be checked
#[wasm_bindgen]
pub fn evaluate_answer(task_json: &str, answer: &str) -> String {
    let task: TaskConfig = match serde_json::from_str(task_json) {
        Ok(task) => task,
        Err(e) => return error_json(e),
    };

    let evaluation = crate::Scorer::new(&task).and_then(|scorer| scorer.evaluate(answer));
    match evaluation {
        Ok(evaluation) => serde_json::to_string(&evaluation).unwrap_or_else(error_json),
        Err(e) => error_json(e),
    }
}

/// Damerau-Levenshtein distance between two strings, counting swaps as one edit.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein(a, b, true)
}

/// Whether two strings are close enough to count as the same word.
#[wasm_bindgen]
pub fn similar(a: &str, b: &str) -> bool {
    crate::are_similar(a, b)
}
