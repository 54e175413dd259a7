// src/exec/command.rs

//! Rendering of job command lines.

use crate::config::model::ConfigSection;
use crate::dag::job::JobId;
use crate::types::SubmitMode;

/// Flag spelling used in job documents.
const PROGRESS_FLAG: &str = "-Progress";
/// Spelling the renderer understands.
const RENDERER_PROGRESS_FLAG: &str = "-progress";

/// Turns a raw command from the job document into a submission-ready line.
///
/// - direct mode: `<program> <args...>`
/// - distributed mode:
///   `<submit_program> <resource_flag> <job_name_flag> <id> <args...> [<hold_flag> a,b]`
///
/// In both modes `-Progress` arguments are rewritten to `-progress`. In
/// distributed mode the raw program token is dropped; the resource flag tells
/// the submission tool which renderer to launch.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    mode: SubmitMode,
    settings: ConfigSection,
}

impl CommandBuilder {
    pub fn new(mode: SubmitMode, settings: ConfigSection) -> Self {
        Self { mode, settings }
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    pub fn build(&self, raw: &str, job_id: &JobId, holds: &[JobId]) -> String {
        let mut tokens = raw.split_whitespace();
        let program = tokens.next();
        let args = tokens.map(normalize_flag);

        match self.mode {
            SubmitMode::Direct => program.into_iter().chain(args).collect::<Vec<_>>().join(" "),
            SubmitMode::Distributed => {
                let hold_list = holds
                    .iter()
                    .map(JobId::as_str)
                    .collect::<Vec<_>>()
                    .join(",");

                let mut parts: Vec<&str> = vec![
                    self.settings.submit_program.as_str(),
                    self.settings.resource_flag.as_str(),
                    self.settings.job_name_flag.as_str(),
                    job_id.as_str(),
                ];
                parts.extend(args);
                if !holds.is_empty() {
                    parts.push(self.settings.hold_flag.as_str());
                    parts.push(hold_list.as_str());
                }
                parts.join(" ")
            }
        }
    }
}

fn normalize_flag(token: &str) -> &str {
    if token == PROGRESS_FLAG {
        RENDERER_PROGRESS_FLAG
    } else {
        token
    }
}
