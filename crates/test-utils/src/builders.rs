#![allow(dead_code)]

use dojob::config::{ConfigSection, JobDocument, RawJobDocument, RawSubtaskBlock, RawTask, Task};
use dojob::types::SubmitMode;

/// Builder for a validated [`Task`] tree node.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            task: Task {
                name: name.to_string(),
                subtask_groups: Vec::new(),
                commands: Vec::new(),
            },
        }
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.task.commands.push(cmd.to_string());
        self
    }

    /// Append one nested sub-task block.
    pub fn subtasks(mut self, group: Vec<Task>) -> Self {
        self.task.subtask_groups.push(group);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for [`JobDocument`], going through the raw model and validation so
/// tests exercise the same path as documents loaded from disk.
pub struct DocumentBuilder {
    raw: RawJobDocument,
}

impl DocumentBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            raw: RawJobDocument {
                title: Some(title.to_string()),
                config: ConfigSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn mode(mut self, mode: SubmitMode) -> Self {
        self.raw.config.mode = mode;
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.raw.task.push(to_raw(&task));
        self
    }

    pub fn build(self) -> JobDocument {
        JobDocument::try_from(self.raw).expect("Failed to build valid document from builder")
    }
}

fn to_raw(task: &Task) -> RawTask {
    RawTask {
        title: Some(task.name.clone()),
        subtasks: task
            .subtask_groups
            .iter()
            .map(|group| RawSubtaskBlock {
                task: group.iter().map(to_raw).collect(),
            })
            .collect(),
        commands: task.commands.clone(),
    }
}

/// Shorthand for a leaf task with the given commands.
pub fn leaf(name: &str, commands: &[&str]) -> Task {
    commands
        .iter()
        .fold(TaskBuilder::new(name), |b, c| b.command(c))
        .build()
}
