/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-trial dual-priority parameters.
//!
//! Under dual-priority scheduling every job starts at its task's *background*
//! priority and is promoted to the *promoted* priority once it has been
//! pending for `phase_change_point` time units.  These knobs are what the
//! search engines vary between trials, so they live in their own types rather
//! than inside [`Task`](crate::task::Task): one immutable workload, many
//! cheap trial configurations.

use thiserror::Error;

use crate::task::{TaskSet, Time};

/// Scheduling priority.  Lower number is higher priority.
pub type Priority = u32;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors detected when validating an [`Assignment`] against a
/// [`TaskSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The assignment does not have exactly one policy per task.
    #[error("assignment has {actual} task policies but the task set has {expected} tasks")]
    LengthMismatch { expected: usize, actual: usize },

    /// A phase change point lies outside `[0, period]`.
    ///
    /// A point equal to the period means the promotion never takes effect;
    /// anything beyond that is meaningless and rejected.
    #[error("task {task} phase change point {value} exceeds its period {period}")]
    PhaseChangePointOutOfRange {
        task: usize,
        value: Time,
        period: Time,
    },
}

// ── PriorityPair ──────────────────────────────────────────────────────────────

/// The two priorities of one task, before the phase change points are chosen.
///
/// This is the fixed input to the FDMS heuristic and the phase-change-point
/// search: both explore promotion points for a given priority ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityPair {
    /// Priority from release until the phase change point.
    pub background: Priority,

    /// Priority from the phase change point until the deadline.
    pub promoted: Priority,
}

impl PriorityPair {
    pub fn new(background: Priority, promoted: Priority) -> Self {
        Self {
            background,
            promoted,
        }
    }
}

// ── TaskPolicy ────────────────────────────────────────────────────────────────

/// Complete dual-priority policy for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPolicy {
    /// Priority from release until the phase change point.
    pub background: Priority,

    /// Priority from the phase change point until the deadline.
    pub promoted: Priority,

    /// Offset from release at which the job switches from `background` to
    /// `promoted`, in `[0, period]`.  `0` means the job always runs promoted;
    /// `period` means the promotion never takes effect.
    pub phase_change_point: Time,
}

impl TaskPolicy {
    pub fn new(priorities: PriorityPair, phase_change_point: Time) -> Self {
        Self {
            background: priorities.background,
            promoted: priorities.promoted,
            phase_change_point,
        }
    }
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// One [`TaskPolicy`] per task, in task order.
///
/// This is both the trial configuration the search engines mutate between
/// simulations and the witness they return on success.
///
/// Priority values are *not* required to be distinct: ties are legal in
/// hand-written configurations and the dispatcher resolves them in favour of
/// the lowest task index.  The exhaustive searches produce distinct values by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    policies: Vec<TaskPolicy>,
}

impl Assignment {
    pub fn new(policies: Vec<TaskPolicy>) -> Self {
        Self { policies }
    }

    /// Zip per-task priority pairs with per-task phase change points.
    ///
    /// Both slices must describe the same tasks in the same order.
    pub fn from_parts(pairs: &[PriorityPair], points: &[Time]) -> Self {
        debug_assert_eq!(
            pairs.len(),
            points.len(),
            "priority pairs and phase change points must cover the same tasks"
        );
        Self {
            policies: pairs
                .iter()
                .zip(points)
                .map(|(&pair, &point)| TaskPolicy::new(pair, point))
                .collect(),
        }
    }

    /// The per-task policies, in task order.
    pub fn policies(&self) -> &[TaskPolicy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Check this assignment against `set`: one policy per task, every phase
    /// change point within `[0, period]`.
    ///
    /// Enumerated configurations satisfy this by construction; the check
    /// guards hand-written configurations from workload files and API
    /// callers.
    pub fn validate(&self, set: &TaskSet) -> Result<(), ConfigError> {
        if self.policies.len() != set.len() {
            return Err(ConfigError::LengthMismatch {
                expected: set.len(),
                actual: self.policies.len(),
            });
        }
        for (i, (policy, task)) in self.policies.iter().zip(set.tasks()).enumerate() {
            if policy.phase_change_point > task.period {
                return Err(ConfigError::PhaseChangePointOutOfRange {
                    task: i,
                    value: policy.phase_change_point,
                    period: task.period,
                });
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
