// src/config/model.rs

use serde::Deserialize;

use crate::types::SubmitMode;

/// Job document as read from disk, before validation.
///
/// ```toml
/// title = "shot010"
///
/// [config]
/// mode = "distributed"
///
/// [[task]]
/// title = "Beauty_Frame0001"
/// commands = ["prman -Progress -t:1 beauty.0001.rib"]
///
/// [[task.subtasks]]
/// [[task.subtasks.task]]
/// title = "Shadow_Frame0001"
/// commands = ["prman -Progress shadow.0001.rib"]
/// ```
///
/// Every node field is optional here so that a missing piece is reported by
/// [`crate::config::validate`] with the path of the offending node, instead of
/// as an anonymous deserialization failure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawJobDocument {
    #[serde(default)]
    pub title: Option<String>,

    /// Scheduler and mode settings from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Root task sequence (`[[task]]`).
    #[serde(default)]
    pub task: Vec<RawTask>,
}

/// `[[task]]` entry.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTask {
    #[serde(default)]
    pub title: Option<String>,

    /// Nested sub-task blocks (`[[task.subtasks]]`), in document order.
    #[serde(default)]
    pub subtasks: Vec<RawSubtaskBlock>,

    /// One entry per command group.
    #[serde(default)]
    pub commands: Vec<String>,
}

/// `[[task.subtasks]]` entry: one nested sequence of tasks.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSubtaskBlock {
    #[serde(default)]
    pub task: Vec<RawTask>,
}

/// `[config]` section.
///
/// The flag fields spell out the distributed submission invocation:
/// `<submit_program> <resource_flag> <job_name_flag> <id> ... <hold_flag> a,b`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigSection {
    /// `"direct"` (default) or `"distributed"`. `--sge` overrides it.
    #[serde(default)]
    pub mode: SubmitMode,

    #[serde(default = "default_submit_program")]
    pub submit_program: String,

    #[serde(default = "default_resource_flag")]
    pub resource_flag: String,

    #[serde(default = "default_job_name_flag")]
    pub job_name_flag: String,

    #[serde(default = "default_hold_flag")]
    pub hold_flag: String,
}

fn default_submit_program() -> String {
    "sub".to_string()
}

fn default_resource_flag() -> String {
    "-rman".to_string()
}

fn default_job_name_flag() -> String {
    "-N".to_string()
}

fn default_hold_flag() -> String {
    "-hold".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            mode: SubmitMode::default(),
            submit_program: default_submit_program(),
            resource_flag: default_resource_flag(),
            job_name_flag: default_job_name_flag(),
            hold_flag: default_hold_flag(),
        }
    }
}

/// Validated job document.
///
/// Obtain one through `JobDocument::try_from(raw)` or
/// [`crate::config::load_and_validate`]; every task in it has a non-blank
/// name and every command is non-blank and trimmed.
#[derive(Debug, Clone)]
pub struct JobDocument {
    pub title: String,
    pub config: ConfigSection,
    pub tasks: Vec<Task>,
}

/// A node of the task tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    /// Nested task sequences. Their jobs become the holds of this task's jobs.
    pub subtask_groups: Vec<Vec<Task>>,
    /// Raw command lines, one job each.
    pub commands: Vec<String>,
}

impl JobDocument {
    pub(crate) fn new_unchecked(title: String, config: ConfigSection, tasks: Vec<Task>) -> Self {
        Self {
            title,
            config,
            tasks,
        }
    }

    /// Number of tasks anywhere in the tree.
    pub fn task_count(&self) -> usize {
        fn count(tasks: &[Task]) -> usize {
            tasks
                .iter()
                .map(|t| 1 + t.subtask_groups.iter().map(|g| count(g)).sum::<usize>())
                .sum()
        }
        count(&self.tasks)
    }
}
