// src/dag/plan.rs

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::job::{JobDescriptor, JobId};
use crate::errors::{DojobError, Result};

/// Every job of one resolution run, in emission order.
///
/// Emission order is the order jobs are handed to the submitter: a task's
/// nested jobs always come before the task's own jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPlan {
    jobs: Vec<JobDescriptor>,
}

impl JobPlan {
    pub fn new(jobs: Vec<JobDescriptor>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[JobDescriptor] {
        &self.jobs
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobDescriptor> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&JobDescriptor> {
        self.jobs.iter().find(|job| job.id.as_str() == id)
    }

    /// Hold graph with an edge `hold -> holder` for every hold.
    pub fn hold_graph(&self) -> DiGraphMap<&str, ()> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for job in &self.jobs {
            graph.add_node(job.id.as_str());
        }
        for job in &self.jobs {
            for hold in &job.holds {
                graph.add_edge(hold.as_str(), job.id.as_str(), ());
            }
        }
        graph
    }

    /// For every job, the jobs that hold on it (released once it finishes),
    /// in emission order. Built in one pass over the hold graph.
    pub fn dependents(&self) -> HashMap<&str, Vec<&str>> {
        let graph = self.hold_graph();
        let index: HashMap<&str, usize> = self
            .jobs
            .iter()
            .enumerate()
            .map(|(i, job)| (job.id.as_str(), i))
            .collect();

        self.jobs
            .iter()
            .map(|job| {
                let mut out: Vec<&str> = graph
                    .neighbors_directed(job.id.as_str(), Direction::Outgoing)
                    .collect();
                out.sort_by_key(|name| index.get(name).copied().unwrap_or(usize::MAX));
                (job.id.as_str(), out)
            })
            .collect()
    }

    /// Jobs that hold on `id`. Use [`JobPlan::dependents`] when asking for
    /// every job of the plan.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.dependents().remove(id).unwrap_or_default()
    }

    /// Check that every hold names a job emitted earlier in the plan.
    ///
    /// A distributed scheduler rejects holds on jobs it has not seen yet, and
    /// direct mode relies on emission order alone, so both regimes need this.
    pub fn check_hold_order(&self) -> Result<()> {
        let mut seen: HashSet<&JobId> = HashSet::new();
        for job in &self.jobs {
            for hold in &job.holds {
                if !seen.contains(hold) {
                    return Err(DojobError::HoldOrder(format!(
                        "job '{}' holds on '{}' which is not submitted before it",
                        job.id, hold
                    )));
                }
            }
            if !seen.insert(&job.id) {
                return Err(DojobError::DuplicateJobId(job.id.to_string()));
            }
        }

        toposort(&self.hold_graph(), None).map_err(|cycle| {
            DojobError::HoldOrder(format!("hold cycle involving job '{}'", cycle.node_id()))
        })?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a JobPlan {
    type Item = &'a JobDescriptor;
    type IntoIter = std::slice::Iter<'a, JobDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::job::JobIdAllocator;

    fn plan_of(specs: &[(&str, Vec<usize>)]) -> JobPlan {
        let mut ids = JobIdAllocator::new();
        let mut jobs: Vec<JobDescriptor> = Vec::new();
        for (name, holds) in specs {
            let id = ids.allocate(name).unwrap();
            let holds = holds.iter().map(|&i| jobs[i].id.clone()).collect();
            jobs.push(JobDescriptor {
                id,
                task: name.to_string(),
                command_line: format!("echo {name}"),
                holds,
            });
        }
        JobPlan::new(jobs)
    }

    #[test]
    fn well_ordered_plan_passes() {
        let plan = plan_of(&[("A", vec![]), ("B", vec![]), ("C", vec![0, 1])]);
        plan.check_hold_order().unwrap();
        assert_eq!(plan.dependents_of("A_1"), vec!["C_3"]);
        assert!(plan.dependents_of("C_3").is_empty());
        assert!(plan.dependents_of("missing").is_empty());
    }

    #[test]
    fn dependents_map_covers_every_job_in_emission_order() {
        let plan = plan_of(&[("A", vec![]), ("B", vec![0]), ("C", vec![0]), ("D", vec![1, 2])]);
        let deps = plan.dependents();
        assert_eq!(deps.len(), 4);
        assert_eq!(deps["A_1"], vec!["B_2", "C_3"]);
        assert_eq!(deps["B_2"], vec!["D_4"]);
        assert_eq!(deps["C_3"], vec!["D_4"]);
        assert!(deps["D_4"].is_empty());
    }

    #[test]
    fn dependents_map_scales_linearly() {
        // 2000 shots with four nested passes each: 10 000 jobs.
        let mut specs: Vec<(String, Vec<usize>)> = Vec::new();
        for shot in 0..2000 {
            let base = specs.len();
            for pass in 0..4 {
                specs.push((format!("Pass{pass}"), vec![]));
            }
            specs.push((format!("Shot_Frame{shot:04}"), (base..base + 4).collect()));
        }
        let borrowed: Vec<(&str, Vec<usize>)> =
            specs.iter().map(|(n, h)| (n.as_str(), h.clone())).collect();
        let plan = plan_of(&borrowed);

        let started = std::time::Instant::now();
        let deps = plan.dependents();
        assert_eq!(deps.len(), 10_000);
        assert_eq!(deps["Pass0_1"], vec!["Shot_Frame0000_5"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn forward_hold_is_rejected() {
        let plan = plan_of(&[("A", vec![]), ("B", vec![0])]);
        let mut jobs = plan.jobs().to_vec();
        jobs.swap(0, 1);
        let err = JobPlan::new(jobs).check_hold_order().unwrap_err();
        assert!(matches!(err, DojobError::HoldOrder(ref msg) if msg.contains("B_2")));
    }
}
