/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Exhaustive search over phase change points for a fixed priority ordering.
//!
//! Every task's point ranges over `[0, period]`, so the space has
//! `∏ (period_i + 1)` configurations.  The walk is lexicographic with task
//! 0's point varying slowest, and stops at the first clean simulation.
//!
//! Exhausting the space proves unschedulability *for these priorities* — but
//! only if the enumeration really visited every configuration, so the visit
//! count is checked against the closed form before `None` is returned.

use tracing::{debug, trace};

use crate::policy::{Assignment, ConfigError, PriorityPair};
use crate::sim::Simulator;
use crate::task::{TaskSet, Time};

use super::enumerate::{for_each_tuple, tuple_count, Step};
use super::error::SearchError;

/// Search all phase change point combinations under `priorities`.
///
/// Returns `Ok(Some(witness))` for the first schedulable configuration in
/// lexicographic order, or `Ok(None)` after (verified) exhaustion.
pub fn search_phase_change_points(
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

    let bounds: Vec<Time> = set.tasks().iter().map(|t| t.period).collect();
    let expected = tuple_count(&bounds)?;
    debug!(combinations = %expected, "testing all phase change point combinations");

    let mut sim = Simulator::new();
    let mut witness: Option<Assignment> = None;

    let walk = for_each_tuple(&bounds, &mut |points: &[Time]| -> Result<Step, SearchError> {
        let trial = Assignment::from_parts(priorities, points);
        match sim.run(set, &trial)? {
            None => {
                debug!(points = ?points, "schedulable with this configuration");
                witness = Some(trial);
                Ok(Step::Done)
            }
            Some(miss) => {
                trace!(points = ?points, task = miss.task, at = miss.at, "deadline miss");
                Ok(Step::Continue)
            }
        }
    })?;

    if witness.is_none() && walk.completed && walk.visited != expected {
        return Err(SearchError::CountMismatch {
            expected,
            generated: walk.visited,
        });
    }
    Ok(witness)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;

    fn pairs(bands: &[(u32, u32)]) -> Vec<PriorityPair> {
        bands
            .iter()
            .map(|&(bg, prom)| PriorityPair::new(bg, prom))
            .collect()
    }

    #[test]
    fn finds_the_lexicographically_first_witness() {
        // The first clean tuple for this set is (0, 0): with both jobs
        // promoted from release, task 0 outranks task 1 the whole way.
        let set = TaskSet::from_pairs(&[(1, 2), (2, 4)]).unwrap();
        let witness = search_phase_change_points(&set, &pairs(&[(1, 0), (0, 2)]))
            .unwrap()
            .unwrap();

        let points: Vec<Time> = witness
            .policies()
            .iter()
            .map(|p| p.phase_change_point)
            .collect();
        assert_eq!(points, vec![0, 0]);
        assert_eq!(simulate(&set, &witness).unwrap(), None);
    }

    #[test]
    fn exhausts_an_unschedulable_space() {
        // U = 1.5: all 3 × 3 tuples miss, and the verified exhaustion shows
        // up as a plain None rather than an error.
        let set = TaskSet::from_pairs(&[(2, 2), (1, 2)]).unwrap();
        let result = search_phase_change_points(&set, &pairs(&[(0, 2), (1, 3)])).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn mismatched_priorities_are_rejected() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 3)]).unwrap();
        let err = search_phase_change_points(&set, &pairs(&[(0, 1)])).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
