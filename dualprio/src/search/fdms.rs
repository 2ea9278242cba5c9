/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! FDMS heuristic for choosing phase change points.
//!
//! FDMS repairs the configuration locally instead of searching: start with
//! every promotion disabled (point = period), simulate, and whenever a task
//! misses, promote it one time unit earlier.  Each repair strictly decreases
//! one point, so the loop terminates after at most `Σ period_i` simulations.
//!
//! The heuristic is sound but not complete: a returned witness is genuinely
//! schedulable, while a failure only means *this repair path* ran out — a
//! different setting of the points may still exist (the third published
//! counterexample is exactly such a case).

use tracing::debug;

use crate::policy::{Assignment, ConfigError, PriorityPair};
use crate::sim::Simulator;
use crate::task::{TaskSet, Time};

use super::error::SearchError;

/// Search for schedulable phase change points under `priorities` using the
/// FDMS repair loop.
///
/// Returns `Ok(Some(witness))` with the repaired assignment, or `Ok(None)`
/// when the miss-repair path bottoms out at a zero phase change point.
pub fn fdms(
    set: &TaskSet,
    priorities: &[PriorityPair],
) -> Result<Option<Assignment>, SearchError> {
    if priorities.len() != set.len() {
        return Err(ConfigError::LengthMismatch {
            expected: set.len(),
            actual: priorities.len(),
        }
        .into());
    }

    let mut points: Vec<Time> = set.tasks().iter().map(|t| t.period).collect();
    let mut sim = Simulator::new();

    loop {
        let trial = Assignment::from_parts(priorities, &points);
        match sim.run(set, &trial)? {
            None => return Ok(Some(trial)),
            Some(miss) => {
                if points[miss.task] == 0 {
                    debug!(
                        task = miss.task,
                        at = miss.at,
                        "phase change point already zero, heuristic failed"
                    );
                    return Ok(None);
                }
                points[miss.task] -= 1;
                debug!(
                    task = miss.task,
                    at = miss.at,
                    phase_change_point = points[miss.task],
                    "deadline miss, promoting the task earlier"
                );
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
