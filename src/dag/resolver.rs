// src/dag/resolver.rs

//! Task tree → held jobs.
//!
//! The resolver walks the tree depth-first in document order. For every task
//! that passes the frame filter it first resolves the task's nested sub-task
//! groups (frame filter disabled below the root), collects the ids of the jobs
//! those groups produced *directly*, and hands that list as the hold-set to
//! each of the task's own command groups.
//!
//! Holds reach exactly one level up: a job emitted two levels down is held on
//! by its own parent task's jobs, never by the grandparent's.

use tracing::{debug, info};

use crate::config::model::{JobDocument, Task};
use crate::dag::filter::FrameFilter;
use crate::dag::job::{JobDescriptor, JobId, JobIdAllocator};
use crate::dag::plan::JobPlan;
use crate::errors::Result;
use crate::exec::command::CommandBuilder;

/// One resolution run.
///
/// Owns the run-scoped id allocator and the emission list; a fresh resolver
/// starts a fresh run.
#[derive(Debug)]
pub struct DependencyResolver<'a> {
    builder: &'a CommandBuilder,
    ids: JobIdAllocator,
    emitted: Vec<JobDescriptor>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(builder: &'a CommandBuilder) -> Self {
        Self {
            builder,
            ids: JobIdAllocator::new(),
            emitted: Vec::new(),
        }
    }

    /// Resolve a sequence of sibling tasks.
    ///
    /// Returns the jobs created directly from these tasks' command groups.
    /// Every job created on the way, nested ones included, is also appended
    /// to the run's emission list (see [`DependencyResolver::into_plan`]).
    pub fn resolve(&mut self, tasks: &[Task], filter: &FrameFilter) -> Result<Vec<JobDescriptor>> {
        self.resolve_at(tasks, filter, 0)
    }

    /// All jobs emitted so far, children before the tasks that hold on them.
    pub fn into_plan(self) -> JobPlan {
        JobPlan::new(self.emitted)
    }

    fn resolve_at(
        &mut self,
        tasks: &[Task],
        filter: &FrameFilter,
        depth: usize,
    ) -> Result<Vec<JobDescriptor>> {
        let mut level = Vec::new();

        for task in tasks {
            if !filter.matches(&task.name) {
                debug!(depth, task = %task.name, "task outside frame range; skipped");
                continue;
            }
            info!(depth, task = %task.name, "executing task");

            let mut child_holds: Vec<JobId> = Vec::new();
            for (group, nested) in task.subtask_groups.iter().enumerate() {
                debug!(depth, task = %task.name, group, "processing sub tasks");
                let jobs = self.resolve_at(nested, &FrameFilter::disabled(), depth + 1)?;
                child_holds.extend(jobs.into_iter().map(|job| job.id));
            }

            for raw in &task.commands {
                let id = self.ids.allocate(&task.name)?;
                let command_line = self.builder.build(raw, &id, &child_holds);
                debug!(
                    depth,
                    job = %id,
                    holds = child_holds.len(),
                    cmd = %command_line,
                    "cooked command"
                );

                let job = JobDescriptor {
                    id,
                    task: task.name.clone(),
                    command_line,
                    holds: child_holds.clone(),
                };
                self.emitted.push(job.clone());
                level.push(job);
            }
        }

        Ok(level)
    }
}

/// Resolve a root task sequence in a fresh run.
pub fn resolve_tasks(
    tasks: &[Task],
    filter: &FrameFilter,
    builder: &CommandBuilder,
) -> Result<JobPlan> {
    let mut resolver = DependencyResolver::new(builder);
    resolver.resolve(tasks, filter)?;
    Ok(resolver.into_plan())
}

/// Resolve a whole validated document in a fresh run.
pub fn resolve_document(
    doc: &JobDocument,
    filter: &FrameFilter,
    builder: &CommandBuilder,
) -> Result<JobPlan> {
    info!(title = %doc.title, tasks = doc.task_count(), "resolving job document");
    let plan = resolve_tasks(&doc.tasks, filter, builder)?;
    info!(jobs = plan.len(), "job document resolved");
    Ok(plan)
}
