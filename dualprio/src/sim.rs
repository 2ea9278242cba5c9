/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Discrete-time simulation of the synchronous arrival sequence.
//!
//! [`Simulator::run`] plays one hyperperiod of dual-priority scheduling and
//! returns the first deadline miss, or `None` for a clean pass.  Because all
//! tasks release together at `t = 0` and the release pattern repeats every
//! hyperperiod, a clean pass over `[0, hyper_period]` proves the
//! configuration schedulable.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Mutable state | [`Simulator`]-owned arena, reset on every `run()`, so search loops reuse one allocation |
//! | "Never released" | `Option<Time>` rather than a sentinel release time |
//! | Invalid configuration | `Err(ConfigError)` before the clock starts |
//! | Task count | any `N`; nothing is fixed at construction |
//!
//! The per-step order is load-bearing and must not be rearranged: misses are
//! detected *before* releases, so a job finishing exactly at its deadline
//! (remaining hits zero in the step before) counts as met.

use tracing::trace;

use crate::policy::{Assignment, ConfigError, Priority, TaskPolicy};
use crate::task::{TaskSet, Time};

// ── Job state ─────────────────────────────────────────────────────────────────

/// Per-task simulation state.
///
/// `remaining` is only meaningful for the most recent job: zero means the job
/// finished (or, together with `last_release: None`, that no job was ever
/// released).
#[derive(Debug, Clone, Default)]
struct JobState {
    /// Release time of the task's most recent job, `None` before the first
    /// release.
    last_release: Option<Time>,

    /// Remaining execution demand of the most recent job.
    remaining: Time,
}

impl JobState {
    /// An unfinished job exists.
    fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// The task may release a new job at time `t`.
    fn can_release(&self, t: Time, period: Time) -> bool {
        match self.last_release {
            None => true,
            Some(release) => t - release >= period,
        }
    }

    /// Effective priority at time `t`: background before the phase change
    /// point, promoted from the phase change point on.
    ///
    /// Only called for active tasks, which always have a release time.
    fn priority(&self, policy: &TaskPolicy, t: Time) -> Priority {
        match self.last_release {
            Some(release) if t - release < policy.phase_change_point => policy.background,
            _ => policy.promoted,
        }
    }
}

// ── DeadlineMiss ──────────────────────────────────────────────────────────────

/// First deadline miss of a simulation run.
///
/// `task` is the lowest-index missing task at the earliest step `at`, so two
/// runs of the same configuration always report the identical pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineMiss {
    /// Index of the task whose job overran its deadline.
    pub task: usize,

    /// Time step at which the miss was detected (the job's deadline).
    pub at: Time,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Reusable simulation engine.
///
/// Holds only the per-task state arena, which is reset at the start of every
/// [`run`](Self::run).  Search engines call `run` millions of times against
/// the same instance without reallocating.
#[derive(Debug, Default)]
pub struct Simulator {
    states: Vec<JobState>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the synchronous arrival sequence of `set` under `assignment`
    /// for one hyperperiod.
    ///
    /// Returns `Ok(None)` if every deadline over `[0, hyper_period]` is met
    /// (the configuration is schedulable), or `Ok(Some(miss))` with the first
    /// miss otherwise.
    ///
    /// # Errors
    /// [`ConfigError`] if `assignment` does not fit `set`; the simulation
    /// clock never starts in that case.
    ///
    /// # Determinism
    /// A pure function of `set` and `assignment`: repeated runs, on this or
    /// any other instance, return identical results.
    pub fn run(
        &mut self,
        set: &TaskSet,
        assignment: &Assignment,
    ) -> Result<Option<DeadlineMiss>, ConfigError> {
        assignment.validate(set)?;

        let tasks = set.tasks();
        let policies = assignment.policies();
        self.reset(tasks.len());

        // The upper bound is inclusive: deadlines falling exactly on the
        // hyperperiod boundary are still checked.
        for t in 0..=set.hyper_period() {
            // Deadline misses first.  A task that is both active and eligible
            // to release has carried work past its implicit deadline.
            for (i, state) in self.states.iter().enumerate() {
                if state.is_active() && state.can_release(t, tasks[i].period) {
                    trace!(task = i, at = t, "deadline miss");
                    return Ok(Some(DeadlineMiss { task: i, at: t }));
                }
            }

            // Release new jobs from all eligible tasks.
            for (i, state) in self.states.iter_mut().enumerate() {
                if state.can_release(t, tasks[i].period) {
                    state.last_release = Some(t);
                    state.remaining = tasks[i].wcet;
                }
            }

            // Dispatch the highest-priority active task.  Strict `<` keeps
            // the earlier task on equal priorities (first index wins).
            let mut dispatched: Option<usize> = None;
            let mut best = Priority::MAX;
            for (i, state) in self.states.iter().enumerate() {
                if !state.is_active() {
                    continue;
                }
                let prio = state.priority(&policies[i], t);
                if dispatched.is_none() || prio < best {
                    dispatched = Some(i);
                    best = prio;
                }
            }

            // Execute for one time unit; an idle step advances the clock only.
            if let Some(i) = dispatched {
                self.states[i].remaining -= 1;
            }
        }

        Ok(None)
    }

    fn reset(&mut self, tasks: usize) {
        self.states.clear();
        self.states.resize(tasks, JobState::default());
    }
}

/// Single-shot convenience wrapper around [`Simulator::run`].
pub fn simulate(set: &TaskSet, assignment: &Assignment) -> Result<Option<DeadlineMiss>, ConfigError> {
    Simulator::new().run(set, assignment)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PriorityPair;
    use crate::task::TaskSet;

    fn assignment(pairs: &[(Priority, Priority)], points: &[Time]) -> Assignment {
        let pairs: Vec<PriorityPair> = pairs
            .iter()
            .map(|&(bg, prom)| PriorityPair::new(bg, prom))
            .collect();
        Assignment::from_parts(&pairs, points)
    }

    // ── Basic outcomes ────────────────────────────────────────────────────────

    #[test]
    fn single_task_filling_its_period_is_schedulable() {
        let set = TaskSet::from_pairs(&[(2, 2)]).unwrap();
        let asg = assignment(&[(0, 1)], &[2]);
        assert_eq!(simulate(&set, &asg).unwrap(), None);
    }

    #[test]
    fn wcet_beyond_period_misses_at_first_deadline() {
        // wcet 3 > period 2: two units execute, the third is still pending
        // when the deadline arrives at t = 2.
        let set = TaskSet::from_pairs(&[(3, 2)]).unwrap();
        let asg = assignment(&[(0, 1)], &[2]);
        assert_eq!(
            simulate(&set, &asg).unwrap(),
            Some(DeadlineMiss { task: 0, at: 2 })
        );
    }

    #[test]
    fn miss_on_the_hyperperiod_boundary_is_detected() {
        // hyper_period == 2 and the miss happens exactly at t == 2: the final
        // step of the inclusive loop is the only one that can see it.
        let set = TaskSet::from_pairs(&[(3, 2)]).unwrap();
        let asg = assignment(&[(0, 1)], &[2]);
        let miss = simulate(&set, &asg).unwrap().unwrap();
        assert_eq!(miss.at, set.hyper_period());
    }

    #[test]
    fn two_independent_tasks_fit_their_slack() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 3)]).unwrap();
        let asg = assignment(&[(0, 2), (1, 3)], &[2, 3]);
        assert_eq!(simulate(&set, &asg).unwrap(), None);
    }

    // ── Tie-breaking ──────────────────────────────────────────────────────────

    #[test]
    fn equal_priorities_dispatch_the_lower_index_first() {
        // Both tasks demand the whole processor at the same priority; the
        // first-index rule starves task 1, which must be the one reported.
        let set = TaskSet::from_pairs(&[(2, 2), (2, 2)]).unwrap();
        let asg = assignment(&[(0, 1), (0, 1)], &[2, 2]);
        assert_eq!(
            simulate(&set, &asg).unwrap(),
            Some(DeadlineMiss { task: 1, at: 2 })
        );
    }

    // ── Phase change behaviour ────────────────────────────────────────────────

    #[test]
    fn promotion_rescues_a_background_starved_task() {
        // Task 1 outranks task 0 in the background band.  With the promotion
        // disabled (point == period) task 0 starves and misses at t = 2; with
        // an early promotion at 1 it preempts in time and the set is clean.
        let set = TaskSet::from_pairs(&[(1, 2), (2, 4)]).unwrap();

        let disabled = assignment(&[(1, 0), (0, 2)], &[2, 4]);
        assert_eq!(
            simulate(&set, &disabled).unwrap(),
            Some(DeadlineMiss { task: 0, at: 2 })
        );

        let promoted = assignment(&[(1, 0), (0, 2)], &[1, 4]);
        assert_eq!(simulate(&set, &promoted).unwrap(), None);
    }

    #[test]
    fn point_zero_runs_the_job_promoted_from_release() {
        // With point 0 the promoted priority applies from the very first
        // step, so task 0 preempts task 1 even though its background value
        // would lose.
        let set = TaskSet::from_pairs(&[(1, 2), (2, 4)]).unwrap();
        let asg = assignment(&[(3, 0), (1, 2)], &[0, 4]);
        assert_eq!(simulate(&set, &asg).unwrap(), None);
    }

    // ── Engine reuse & determinism ────────────────────────────────────────────

    #[test]
    fn reused_simulator_matches_fresh_runs() {
        let set = TaskSet::from_pairs(&[(1, 2), (2, 4)]).unwrap();
        let clean = assignment(&[(1, 0), (0, 2)], &[1, 4]);
        let missing = assignment(&[(1, 0), (0, 2)], &[2, 4]);

        let mut sim = Simulator::new();
        let first = sim.run(&set, &missing).unwrap();
        // A clean run in between must not leak state into the next one.
        assert_eq!(sim.run(&set, &clean).unwrap(), None);
        assert_eq!(sim.run(&set, &missing).unwrap(), first);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let set = TaskSet::from_pairs(&[(2, 3), (2, 5), (1, 15)]).unwrap();
        let asg = assignment(&[(0, 3), (1, 4), (2, 5)], &[3, 5, 15]);

        let mut sim = Simulator::new();
        let reference = sim.run(&set, &asg).unwrap();
        for _ in 0..49 {
            assert_eq!(
                sim.run(&set, &asg).unwrap(),
                reference,
                "simulator produced different output on repeated identical input"
            );
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn mismatched_assignment_is_rejected_before_simulation() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 3)]).unwrap();
        let asg = assignment(&[(0, 1)], &[2]);
        assert_eq!(
            simulate(&set, &asg).unwrap_err(),
            ConfigError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn out_of_range_point_is_rejected_before_simulation() {
        let set = TaskSet::from_pairs(&[(1, 2)]).unwrap();
        let asg = assignment(&[(0, 1)], &[3]);
        assert!(matches!(
            simulate(&set, &asg).unwrap_err(),
            ConfigError::PhaseChangePointOutOfRange { task: 0, .. }
        ));
    }
}
