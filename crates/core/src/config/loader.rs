//! Task file loading

use super::schema::TaskConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Supported task file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormat {
    Toml,
    Json,
}

impl TaskFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loaded task together with where it came from
#[derive(Debug, Clone)]
pub struct Task {
    pub schema: TaskConfig,
    pub path: Option<String>,
}

impl Task {
    /// Load a task from a file path, or from the first standard location found
    pub fn load(path: Option<&str>) -> Result<Self> {
        let task_path = path
            .map(String::from)
            .or_else(find_task_file)
            .ok_or_else(|| {
                Error::new(
                    crate::error::ErrorCode::ConfigNotFound,
                    "No task file given and none found",
                )
                .with_suggestion("Create essay-task.toml or pass --task <file>")
            })?;

        let schema = load_task_file(&task_path)?;

        Ok(Self {
            schema,
            path: Some(task_path),
        })
    }

    /// Parse task content held in memory
    pub fn parse(content: &str, format: TaskFormat) -> Result<Self> {
        let schema = match format {
            TaskFormat::Toml => toml::from_str(content)?,
            TaskFormat::Json => serde_json::from_str(content)?,
        };
        Ok(Self { schema, path: None })
    }
}

/// Find a task file in standard locations
fn find_task_file() -> Option<String> {
    let candidates = ["essay-task.toml", ".essay-task.toml", "essay-task.json"];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Read and parse a task file, choosing the format by extension
fn load_task_file(path: &str) -> Result<TaskConfig> {
    let format = TaskFormat::from_path(Path::new(path)).ok_or_else(|| Error::unsupported_format(path))?;

    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read task file {}", path))?;

    Task::parse(&content, format)
        .map(|task| task.schema)
        .context(format!("Failed to parse task file {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_parse_toml() {
        let content = r#"
            title = "Pets"

            [[keywords]]
            keyword = "cat"
            alternatives = ["feline", "c*t"]

            [keywords.options]
            points = 2
            occurrences = 1
            caseSensitive = false

            [behaviour]
            percentagePassing = 50
        "#;
        let task = Task::parse(content, TaskFormat::Toml).unwrap();
        assert_eq!(task.schema.keywords.len(), 1);
        assert_eq!(task.schema.keywords[0].alternatives, vec!["feline", "c*t"]);
        assert!(!task.schema.keywords[0].options.case_sensitive);
        assert_eq!(task.schema.behaviour.percentage_passing, Some(50.0));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"keywords": [{{"keyword": "H5P"}}]}}"#).unwrap();

        let task = Task::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(task.schema.keywords[0].keyword.as_deref(), Some("H5P"));
        assert!(task.path.is_some());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = Task::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFormat);
    }

    #[test]
    fn test_missing_file() {
        let err = Task::load(Some("/nonexistent/essay-task.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_parse_error_code() {
        let err = Task::parse("keywords = [", TaskFormat::Toml).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
