use std::collections::HashSet;

use proptest::prelude::*;

use dojob::config::{ConfigSection, Task};
use dojob::dag::{FrameFilter, JobPlan, resolve_tasks};
use dojob::exec::CommandBuilder;
use dojob::types::SubmitMode;

// Task trees up to three levels deep. `framed` decides whether names carry a
// trailing `Frame<digits>`.
fn tree_strategy(framed: bool) -> impl Strategy<Value = Vec<Task>> {
    let name = if framed {
        (0..40u32).prop_map(|n| format!("T_Frame{n:04}")).boxed()
    } else {
        "[A-Z][a-z]{0,6}(_[a-z]{1,4})?".boxed()
    };

    let leaf = (name.clone(), proptest::collection::vec("echo [a-z]{1,5}", 0..3)).prop_map(
        |(name, commands)| Task {
            name,
            subtask_groups: Vec::new(),
            commands,
        },
    );

    let task = leaf.prop_recursive(3, 40, 4, move |inner| {
        (
            name.clone(),
            proptest::collection::vec(proptest::collection::vec(inner, 0..3), 0..3),
            proptest::collection::vec("echo [a-z]{1,5}", 0..3),
        )
            .prop_map(|(name, subtask_groups, commands)| Task {
                name,
                subtask_groups,
                commands,
            })
    });

    proptest::collection::vec(task, 0..6)
}

fn builder() -> CommandBuilder {
    CommandBuilder::new(SubmitMode::Distributed, ConfigSection::default())
}

fn snapshot(plan: &JobPlan) -> Vec<(String, String, Vec<String>)> {
    plan.iter()
        .map(|j| {
            (
                j.id.to_string(),
                j.command_line.clone(),
                j.holds.iter().map(|h| h.to_string()).collect(),
            )
        })
        .collect()
}

/// Count the commands reachable from `tasks`, honoring the filter at this
/// level only.
fn expected_jobs(tasks: &[Task], filter: &FrameFilter) -> usize {
    tasks
        .iter()
        .filter(|t| filter.matches(&t.name))
        .map(|t| {
            t.commands.len()
                + t.subtask_groups
                    .iter()
                    .map(|g| expected_jobs(g, &FrameFilter::disabled()))
                    .sum::<usize>()
        })
        .sum()
}

proptest! {
    #[test]
    fn filter_is_noop_without_frame_suffixes(
        tree in tree_strategy(false),
        start in proptest::option::of(-5i64..50),
        end in proptest::option::of(-5i64..50),
    ) {
        let unfiltered = resolve_tasks(&tree, &FrameFilter::disabled(), &builder()).unwrap();
        let filtered = resolve_tasks(&tree, &FrameFilter::new(start, end), &builder()).unwrap();
        prop_assert_eq!(snapshot(&unfiltered), snapshot(&filtered));
    }

    #[test]
    fn resolution_is_deterministic(
        tree in tree_strategy(true),
        start in proptest::option::of(0i64..40),
        end in proptest::option::of(0i64..40),
    ) {
        let filter = FrameFilter::new(start, end);
        let first = resolve_tasks(&tree, &filter, &builder()).unwrap();
        let second = resolve_tasks(&tree, &filter, &builder()).unwrap();
        prop_assert_eq!(snapshot(&first), snapshot(&second));
    }

    #[test]
    fn plans_are_complete_unique_and_hold_ordered(
        tree in tree_strategy(true),
        start in proptest::option::of(0i64..40),
        end in proptest::option::of(0i64..40),
    ) {
        let filter = FrameFilter::new(start, end);
        let plan = resolve_tasks(&tree, &filter, &builder()).unwrap();

        prop_assert_eq!(plan.len(), expected_jobs(&tree, &filter));
        let ids: HashSet<&str> = plan.iter().map(|j| j.id.as_str()).collect();
        prop_assert_eq!(ids.len(), plan.len());
        prop_assert!(plan.check_hold_order().is_ok());

        for job in plan.iter() {
            if job.holds.is_empty() {
                prop_assert!(!job.command_line.contains(" -hold "));
            } else {
                let expected = job
                    .holds
                    .iter()
                    .map(|h| h.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                let suffix = format!(" -hold {expected}");
                prop_assert!(job.command_line.ends_with(&suffix));
            }
        }
    }
}
