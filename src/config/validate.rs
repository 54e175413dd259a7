// src/config/validate.rs

use crate::config::model::{ConfigSection, JobDocument, RawJobDocument, RawTask, Task};
use crate::errors::{DojobError, Result};

impl TryFrom<RawJobDocument> for JobDocument {
    type Error = DojobError;

    fn try_from(raw: RawJobDocument) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw.config)?;
        let title = required_text(raw.title.as_deref(), "document", "missing title")?;
        ensure_has_tasks(&raw)?;
        let tasks = convert_sequence(&raw.task, "")?;
        Ok(JobDocument::new_unchecked(title, raw.config, tasks))
    }
}

fn ensure_has_tasks(raw: &RawJobDocument) -> Result<()> {
    if raw.task.is_empty() {
        return Err(DojobError::document(
            "document",
            "must contain at least one [[task]] entry",
        ));
    }
    Ok(())
}

fn validate_config(cfg: &ConfigSection) -> Result<()> {
    let fields = [
        ("submit_program", &cfg.submit_program),
        ("resource_flag", &cfg.resource_flag),
        ("job_name_flag", &cfg.job_name_flag),
        ("hold_flag", &cfg.hold_flag),
    ];
    for (key, value) in fields {
        if value.trim().is_empty() {
            return Err(DojobError::Config(format!("[config].{key} must not be empty")));
        }
        if value.split_whitespace().count() > 1 {
            return Err(DojobError::Config(format!(
                "[config].{key} must be a single token (got '{value}')"
            )));
        }
    }
    Ok(())
}

/// `prefix` is the path of the owning block, empty for the root sequence.
fn convert_sequence(tasks: &[RawTask], prefix: &str) -> Result<Vec<Task>> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let path = if prefix.is_empty() {
                format!("task[{i}]")
            } else {
                format!("{prefix}.task[{i}]")
            };
            convert_task(raw, &path)
        })
        .collect()
}

fn convert_task(raw: &RawTask, path: &str) -> Result<Task> {
    let name = required_text(raw.title.as_deref(), path, "missing title")?;

    let subtask_groups = raw
        .subtasks
        .iter()
        .enumerate()
        .map(|(g, block)| convert_sequence(&block.task, &format!("{path}.subtasks[{g}]")))
        .collect::<Result<Vec<_>>>()?;

    let commands = raw
        .commands
        .iter()
        .enumerate()
        .map(|(c, cmd)| {
            required_text(Some(cmd.as_str()), &format!("{path}.commands[{c}]"), "missing command text")
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Task {
        name,
        subtask_groups,
        commands,
    })
}

fn required_text(value: Option<&str>, path: &str, message: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(DojobError::document(path, message)),
    }
}
