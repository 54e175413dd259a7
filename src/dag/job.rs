// src/dag/job.rs

//! Job descriptors and run-scoped id allocation.

use std::collections::HashSet;
use std::fmt;

use crate::errors::{DojobError, Result};

/// Identifier of one job, unique within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        JobId(id)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One unit of submittable work, created for a single command group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub id: JobId,
    /// Name of the task that owns the command.
    pub task: String,
    /// Fully rendered, submission-ready command line.
    pub command_line: String,
    /// Jobs that must finish before this one starts, in discovery order.
    pub holds: Vec<JobId>,
}

/// Task name reduced to `[A-Za-z0-9_.-]`; anything else becomes `_`.
///
/// Ids end up as a single shell word after `-N` and inside the comma-joined
/// hold list, so they must carry neither separators nor shell syntax.
fn id_stem(task_name: &str) -> String {
    task_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Hands out `<task>_<n>` ids with `n` counting up from 1 for the whole run.
///
/// The counter alone keeps ids distinct (the suffix after the last `_` is
/// digits only, so it decodes back to a unique `n`). Issued ids are still
/// recorded and a repeat is reported as [`DojobError::DuplicateJobId`].
#[derive(Debug, Default)]
pub struct JobIdAllocator {
    next: u64,
    issued: HashSet<JobId>,
}

impl JobIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, task_name: &str) -> Result<JobId> {
        self.next += 1;
        let id = JobId(format!("{}_{}", id_stem(task_name), self.next));
        self.register(id)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    fn register(&mut self, id: JobId) -> Result<JobId> {
        if !self.issued.insert(id.clone()) {
            return Err(DojobError::DuplicateJobId(id.0));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_count_up_across_tasks() {
        let mut ids = JobIdAllocator::new();
        assert_eq!(ids.allocate("Shadow").unwrap().as_str(), "Shadow_1");
        assert_eq!(ids.allocate("Beauty").unwrap().as_str(), "Beauty_2");
        assert_eq!(ids.allocate("Shadow").unwrap().as_str(), "Shadow_3");
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn whitespace_in_names_becomes_underscore() {
        let mut ids = JobIdAllocator::new();
        assert_eq!(ids.allocate("key light\tpass").unwrap().as_str(), "key_light_pass_1");
    }

    #[test]
    fn separators_and_shell_syntax_are_replaced() {
        let mut ids = JobIdAllocator::new();
        assert_eq!(ids.allocate("Key,Fill").unwrap().as_str(), "Key_Fill_1");
        assert_eq!(
            ids.allocate("Rim;rm -rf x").unwrap().as_str(),
            "Rim_rm_-rf_x_2"
        );
        assert_eq!(
            ids.allocate("a'$(b)&c|d>e").unwrap().as_str(),
            "a___b__c_d_e_3"
        );
        assert_eq!(ids.allocate("Shot.v2-L").unwrap().as_str(), "Shot.v2-L_4");
    }

    #[test]
    fn names_ending_in_digits_do_not_collide() {
        let mut ids = JobIdAllocator::new();
        let mut seen = HashSet::new();
        for name in ["A", "A_1", "A_1_1", "A_11", "A_1"] {
            for _ in 0..20 {
                assert!(seen.insert(ids.allocate(name).unwrap()));
            }
        }
    }

    #[test]
    fn repeated_registration_is_rejected() {
        let mut ids = JobIdAllocator::new();
        let id = ids.allocate("A").unwrap();
        let err = ids.register(id).unwrap_err();
        assert!(matches!(err, DojobError::DuplicateJobId(ref s) if s == "A_1"));
    }
}
