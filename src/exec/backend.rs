// src/exec/backend.rs

//! Pluggable submission backend.
//!
//! The run loop hands each job of a [`JobPlan`] to a `Submitter`, strictly in
//! emission order and one at a time: the next job is only handed over once
//! the previous submission returned. In direct mode that sequencing *is* the
//! dependency enforcement. In distributed mode each submission only enqueues
//! the job and the farm scheduler enforces the holds.
//!
//! - `ProcessSubmitter` runs the rendered command line as a local process.
//! - Tests provide their own `Submitter` that records what it was given.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info};

use crate::dag::{JobDescriptor, JobPlan};
use crate::errors::{DojobError, Result};

use super::task_runner::run_job;

/// Trait abstracting how a resolved job leaves the process.
pub trait Submitter: Send {
    /// Run or enqueue one job. Resolves once the job was accepted (direct
    /// mode: once it finished). An error aborts the remaining plan.
    fn submit<'a>(
        &'a mut self,
        job: &'a JobDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Submitter used in production: runs each command line through the shell.
///
/// A non-zero exit status is reported as [`DojobError::SubmitFailed`].
#[derive(Debug, Default)]
pub struct ProcessSubmitter;

impl ProcessSubmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Submitter for ProcessSubmitter {
    fn submit<'a>(
        &'a mut self,
        job: &'a JobDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let code = run_job(job).await?;
            if code != 0 {
                return Err(DojobError::SubmitFailed {
                    job: job.id.to_string(),
                    code,
                });
            }
            Ok(())
        })
    }
}

/// Hand every job of the plan to `submitter`, in order, stopping at the first
/// failure.
pub async fn submit_plan<S>(plan: &JobPlan, submitter: &mut S) -> Result<()>
where
    S: Submitter + ?Sized,
{
    plan.check_hold_order()?;

    for (index, job) in plan.iter().enumerate() {
        info!(
            job = %job.id,
            task = %job.task,
            holds = job.holds.len(),
            "submitting job {}/{}",
            index + 1,
            plan.len()
        );
        submitter.submit(job).await?;
        debug!(job = %job.id, "job accepted");
    }

    info!(jobs = plan.len(), "all jobs submitted");
    Ok(())
}
