use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use dojob::dag::JobDescriptor;
use dojob::errors::{DojobError, Result};
use dojob::exec::Submitter;

/// A fake submitter that:
/// - records every job it was handed, in order
/// - reports failure for jobs whose id is listed in `fail_ids`.
#[derive(Clone, Default)]
pub struct RecordingSubmitter {
    submitted: Arc<Mutex<Vec<JobDescriptor>>>,
    fail_ids: Vec<String>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(ids: &[&str]) -> Self {
        Self {
            submitted: Arc::default(),
            fail_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn submitted(&self) -> Vec<JobDescriptor> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submitted_ids(&self) -> Vec<String> {
        self.submitted()
            .into_iter()
            .map(|job| job.id.to_string())
            .collect()
    }
}

impl Submitter for RecordingSubmitter {
    fn submit<'a>(
        &'a mut self,
        job: &'a JobDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.submitted.lock().unwrap().push(job.clone());
            if self.fail_ids.iter().any(|id| id == job.id.as_str()) {
                return Err(DojobError::SubmitFailed {
                    job: job.id.to_string(),
                    code: 1,
                });
            }
            Ok(())
        })
    }
}
