/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the dual-priority verifier.
//!
//! Two distinct types model the two sides of a schedulability trial:
//!
//! ```text
//! Task / TaskSet  ──(fixed workload)──►  Simulator  ◄──(per-trial)──  Assignment
//!       ↑ immutable static parameters                      ↑ policy under test
//! ```
//!
//! # Ownership model
//! A [`TaskSet`] is built once and then only borrowed: the search engines run
//! millions of simulations against the same `&TaskSet` while mutating their
//! own trial [`Assignment`](crate::policy::Assignment)s.  Simulation state
//! lives in the [`Simulator`](crate::sim::Simulator), never in the tasks, so
//! the compiler guarantees a trial cannot corrupt the workload description.

use thiserror::Error;

use crate::hyperperiod::{self, HyperperiodError};

/// Discrete, dimensionless time unit used throughout the verifier.
///
/// All task parameters (WCET, period, phase change points) and all simulation
/// clocks are expressed in this unit.
pub type Time = u64;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors detected while constructing a [`TaskSet`].
#[derive(Debug, Error)]
pub enum ModelError {
    /// [`TaskSet::new`] was called with an empty task list.
    #[error("task list is empty")]
    Empty,

    /// A task has a zero worst-case execution time.  A job that needs no
    /// execution can never miss a deadline, so a zero WCET almost always
    /// indicates a data-entry mistake.
    #[error("task {task} has zero wcet")]
    ZeroWcet { task: usize },

    /// A task has a zero period, which would make it release continuously.
    #[error("task {task} has zero period")]
    ZeroPeriod { task: usize },

    /// The hyperperiod (LCM of all periods) overflowed `u64`.
    #[error("hyperperiod calculation failed: {0}")]
    Hyperperiod(#[from] HyperperiodError),
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// Fixed parameters of one periodic task.
///
/// The relative deadline is implicit and equals `period`: a job released at
/// time `r` must finish strictly before the next release at `r + period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    /// Worst-case execution time in time units.
    pub wcet: Time,

    /// Release period (and implicit relative deadline) in time units.
    pub period: Time,
}

impl Task {
    pub fn new(wcet: Time, period: Time) -> Self {
        Self { wcet, period }
    }

    /// CPU utilisation fraction: `wcet / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.wcet as f64 / self.period as f64
        }
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// A validated, ordered set of periodic tasks plus its hyperperiod.
///
/// Task order is significant: priorities, phase change points and deadline
/// miss reports all refer to tasks by index, and the dispatcher breaks
/// priority ties in favour of the lowest index.
///
/// The hyperperiod is computed once at construction so every simulation can
/// read it for free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    hyper_period: Time,
}

impl TaskSet {
    /// Validate `tasks` and compute the hyperperiod.
    ///
    /// # Errors
    /// * [`ModelError::Empty`] — `tasks` is empty.
    /// * [`ModelError::ZeroWcet`] / [`ModelError::ZeroPeriod`] — a task has a
    ///   non-positive parameter (reported with its index).
    /// * [`ModelError::Hyperperiod`] — the LCM of the periods overflowed.
    ///
    /// `wcet > period` is intentionally *not* rejected here: such a task is
    /// trivially unschedulable and the simulator reports the natural first
    /// deadline miss instead.
    pub fn new(tasks: Vec<Task>) -> Result<Self, ModelError> {
        if tasks.is_empty() {
            return Err(ModelError::Empty);
        }
        for (i, task) in tasks.iter().enumerate() {
            if task.wcet == 0 {
                return Err(ModelError::ZeroWcet { task: i });
            }
            if task.period == 0 {
                return Err(ModelError::ZeroPeriod { task: i });
            }
        }

        let periods: Vec<Time> = tasks.iter().map(|t| t.period).collect();
        let hyper_period = hyperperiod::lcm_of_slice(&periods)?;

        Ok(Self {
            tasks,
            hyper_period,
        })
    }

    /// Build a set from `(wcet, period)` pairs.
    pub fn from_pairs(pairs: &[(Time, Time)]) -> Result<Self, ModelError> {
        Self::new(pairs.iter().map(|&(c, t)| Task::new(c, t)).collect())
    }

    /// The tasks, in construction order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the set.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always `false` for a constructed set; provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// LCM of all task periods.  One simulated hyperperiod is sufficient to
    /// decide schedulability because the synchronous arrival sequence repeats
    /// after it.
    pub fn hyper_period(&self) -> Time {
        self.hyper_period
    }

    /// Sum of all task utilisations.
    ///
    /// `> 1.0` means no priority assignment whatsoever can be schedulable on
    /// one processor — a cheap necessary condition the analysis layer logs
    /// before starting an expensive search.
    pub fn total_utilization(&self) -> f64 {
        self.tasks.iter().map(Task::utilization).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Task ──────────────────────────────────────────────────────────────────

    #[test]
    fn task_utilization_is_correct() {
        let task = Task::new(1, 10);
        assert!((task.utilization() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn task_utilization_zero_period_returns_zero() {
        let task = Task { wcet: 3, period: 0 };
        assert_eq!(task.utilization(), 0.0);
    }

    // ── TaskSet construction ──────────────────────────────────────────────────

    #[test]
    fn empty_task_list_is_rejected() {
        let err = TaskSet::new(vec![]).unwrap_err();
        assert!(matches!(err, ModelError::Empty));
    }

    #[test]
    fn zero_wcet_is_rejected_with_index() {
        let err = TaskSet::from_pairs(&[(1, 5), (0, 7)]).unwrap_err();
        assert!(matches!(err, ModelError::ZeroWcet { task: 1 }));
    }

    #[test]
    fn zero_period_is_rejected_with_index() {
        let err = TaskSet::from_pairs(&[(1, 0)]).unwrap_err();
        assert!(matches!(err, ModelError::ZeroPeriod { task: 0 }));
    }

    #[test]
    fn wcet_exceeding_period_is_accepted() {
        // Trivially unschedulable, but construction succeeds: the simulator
        // reports the natural first miss instead.
        let set = TaskSet::from_pairs(&[(3, 2)]).unwrap();
        assert_eq!(set.hyper_period(), 2);
    }

    #[test]
    fn hyperperiod_is_lcm_of_periods() {
        let set = TaskSet::from_pairs(&[(1, 4), (1, 6), (1, 8)]).unwrap();
        assert_eq!(set.hyper_period(), 24);
    }

    #[test]
    fn hyperperiod_overflow_is_reported() {
        let huge = u64::MAX / 2 + 1;
        let err = TaskSet::from_pairs(&[(1, huge), (1, huge - 1)]).unwrap_err();
        assert!(matches!(err, ModelError::Hyperperiod(_)));
    }

    // ── utilisation ───────────────────────────────────────────────────────────

    #[test]
    fn total_utilization_sums_all_tasks() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 4)]).unwrap();
        assert!((set.total_utilization() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn counterexample_sets_are_almost_fully_utilised() {
        // Values documented in "Dual Priority Scheduling is Not Optimal"
        let first = TaskSet::from_pairs(&[(8, 19), (13, 29), (9, 151), (14, 197)]).unwrap();
        let second = TaskSet::from_pairs(&[(13, 29), (17, 47), (4, 89), (28, 193)]).unwrap();
        let third = TaskSet::from_pairs(&[(6, 11), (6, 20), (4, 46), (5, 74)]).unwrap();

        for set in [&first, &second, &third] {
            let u = set.total_utilization();
            assert!(u < 1.0, "counterexample sets are feasible: U = {u}");
            assert!(u > 0.9999, "counterexample sets are nearly saturated: U = {u}");
        }
    }
}
