//! Property tests for the hyperperiod simulator.

use proptest::prelude::*;

use dualprio::policy::{Assignment, Priority, PriorityPair, TaskPolicy};
use dualprio::sim::{simulate, DeadlineMiss, Simulator};
use dualprio::task::{TaskSet, Time};

/// One task with a full random configuration: wcet, period, background and
/// promoted priorities, and a raw phase change point clamped to the period
/// when the assignment is built.
type TaskCase = (Time, Time, Priority, Priority, Time);

fn task_cases() -> impl Strategy<Value = Vec<TaskCase>> {
    prop::collection::vec((1u64..=5, 1u64..=8, 0u32..8, 0u32..8, 0u64..=8), 1..=3)
}

fn build(case: &[TaskCase]) -> (TaskSet, Assignment) {
    let pairs: Vec<(Time, Time)> = case.iter().map(|&(wcet, period, ..)| (wcet, period)).collect();
    let set = TaskSet::from_pairs(&pairs).unwrap();
    let policies = case
        .iter()
        .map(|&(_, period, background, promoted, raw_point)| {
            TaskPolicy::new(
                PriorityPair::new(background, promoted),
                raw_point.min(period),
            )
        })
        .collect();
    (set, Assignment::new(policies))
}

proptest! {
    #[test]
    fn repeated_runs_agree(case in task_cases()) {
        let (set, assignment) = build(&case);
        let first = simulate(&set, &assignment).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(simulate(&set, &assignment).unwrap(), first);
        }
    }

    #[test]
    fn reused_simulator_agrees_with_fresh_runs(
        warmup in task_cases(),
        case in task_cases(),
    ) {
        let (warm_set, warm_assignment) = build(&warmup);
        let (set, assignment) = build(&case);

        let mut sim = Simulator::new();
        sim.run(&warm_set, &warm_assignment).unwrap();
        let reused = sim.run(&set, &assignment).unwrap();

        prop_assert_eq!(reused, simulate(&set, &assignment).unwrap());
    }

    #[test]
    fn single_task_misses_exactly_when_overcommitted(
        (wcet, period, background, promoted, raw_point)
            in (1u64..=12, 1u64..=8, 0u32..4, 0u32..4, 0u64..=8),
    ) {
        let set = TaskSet::from_pairs(&[(wcet, period)]).unwrap();
        let assignment = Assignment::new(vec![TaskPolicy::new(
            PriorityPair::new(background, promoted),
            raw_point.min(period),
        )]);

        let outcome = simulate(&set, &assignment).unwrap();
        if wcet > period {
            prop_assert_eq!(outcome, Some(DeadlineMiss { task: 0, at: period }));
        } else {
            prop_assert_eq!(outcome, None);
        }
    }

    #[test]
    fn promoted_priority_is_irrelevant_when_never_reached(case in task_cases()) {
        // With every phase change point at the period, a job is missed or
        // replaced at the exact step the promotion would start, so the
        // promoted band never takes effect.
        let (set, _) = build(&case);
        let backgrounds: Vec<Priority> = case.iter().map(|&(_, _, bg, ..)| bg).collect();

        let variant = |promoted_shift: Priority| -> Assignment {
            Assignment::new(
                set.tasks()
                    .iter()
                    .zip(&backgrounds)
                    .map(|(task, &background)| {
                        TaskPolicy::new(
                            PriorityPair::new(background, background + promoted_shift),
                            task.period,
                        )
                    })
                    .collect(),
            )
        };

        let base = simulate(&set, &variant(0)).unwrap();
        prop_assert_eq!(simulate(&set, &variant(3)).unwrap(), base);
        prop_assert_eq!(simulate(&set, &variant(17)).unwrap(), base);
    }
}
