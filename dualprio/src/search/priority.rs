/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Exhaustive searches over priority assignments.
//!
//! A set of `N` tasks has `2N` priority slots (one background and one
//! promoted per task), filled with pairwise-distinct values from
//! `{0, …, 2N−1}`.  Two searches are provided:
//!
//! * [`search_all_priorities`] — every permutation of the `2N` values,
//!   `(2N)!` assignments.  The promoted block enumerates slowest, so
//!   assignments differing only in background order are tried together.
//! * [`search_rm_priorities`] — background priorities restricted to
//!   rate-monotonic order (ascending with task index, tasks sorted by
//!   period), promoted priorities free: `C(2N, N) · N! = (2N)!/N!`
//!   assignments.
//!
//! Every assignment is handed to the phase-change-point search, so a single
//! hit anywhere in the nested space ends the whole walk with a complete
//! witness.  As in the phase search, exhaustion is only trusted after the
//! visit count matches the closed form.

use tracing::debug;

use crate::policy::{Assignment, Priority, PriorityPair};
use crate::task::TaskSet;

use super::enumerate::{
    falling_factorial, for_each_combination, for_each_permutation, Step,
};
use super::error::SearchError;
use super::phase::search_phase_change_points;

// ── General search ────────────────────────────────────────────────────────────

/// Search every dual-priority assignment of `set`, delegating each one to the
/// phase-change-point search.
///
/// Returns `Ok(Some(witness))` for the first schedulable configuration, or
/// `Ok(None)` when no assignment of priorities and phase change points
/// whatsoever is schedulable.
pub fn search_all_priorities(set: &TaskSet) -> Result<Option<Assignment>, SearchError> {
    let n = set.len();
    let slots = 2 * n;
    let values: Vec<Priority> = (0..slots as Priority).collect();
    let expected = falling_factorial(slots, slots)?;
    debug!(total = %expected, "testing all priority permutations");

    let mut witness: Option<Assignment> = None;
    let mut generated: u128 = 0;

    let walk = for_each_permutation(&values, &mut |perm: &[Priority]| -> Result<Step, SearchError> {
        // Slots 0..n are the promoted priorities, n..2n the backgrounds.
        let pairs: Vec<PriorityPair> = (0..n)
            .map(|i| PriorityPair::new(perm[n + i], perm[i]))
            .collect();

        generated += 1;
        debug!(
            generated = %generated,
            total = %expected,
            pairs = ?pairs,
            "generated priority permutation"
        );

        match search_phase_change_points(set, &pairs)? {
            Some(found) => {
                witness = Some(found);
                Ok(Step::Done)
            }
            None => {
                debug!("unschedulable for all combinations of phase change points");
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
    if witness.is_none() {
        debug!("task set is not dual-priority schedulable");
    }
    Ok(witness)
}

// ── Rate-monotonic search ─────────────────────────────────────────────────────

/// Search every dual-priority assignment whose background priorities are in
/// rate-monotonic order.
///
/// # Errors
/// [`SearchError::NotSortedByPeriod`] unless the tasks are sorted by
/// non-decreasing period — otherwise "ascending background priorities" would
/// not mean rate-monotonic.
pub fn search_rm_priorities(set: &TaskSet) -> Result<Option<Assignment>, SearchError> {
    let tasks = set.tasks();
    for i in 1..tasks.len() {
        if tasks[i].period < tasks[i - 1].period {
            return Err(SearchError::NotSortedByPeriod { task: i });
        }
    }

    let n = set.len();
    let pool = 2 * n;
    let expected = falling_factorial(pool, n)?;
    debug!(total = %expected, "testing all priority permutations with rate-monotonic backgrounds");

    let mut witness: Option<Assignment> = None;
    let mut generated: u128 = 0;

    let outer = for_each_combination(n, pool, &mut |backgrounds: &[Priority]| -> Result<Step, SearchError> {
        // The promoted priorities permute the values the backgrounds left over.
        let complement: Vec<Priority> = (0..pool as Priority)
            .filter(|v| !backgrounds.contains(v))
            .collect();

        for_each_permutation(&complement, &mut |promoted: &[Priority]| -> Result<Step, SearchError> {
            let pairs: Vec<PriorityPair> = (0..n)
                .map(|i| PriorityPair::new(backgrounds[i], promoted[i]))
                .collect();

            generated += 1;
            debug!(
                generated = %generated,
                total = %expected,
                pairs = ?pairs,
                "generated priority permutation"
            );

            match search_phase_change_points(set, &pairs)? {
                Some(found) => {
                    witness = Some(found);
                    Ok(Step::Done)
                }
                None => {
                    debug!("unschedulable for all combinations of phase change points");
                    Ok(Step::Continue)
                }
            }
        })?;

        Ok(if witness.is_some() {
            Step::Done
        } else {
            Step::Continue
        })
    })?;

    if witness.is_none() && outer.completed && generated != expected {
        return Err(SearchError::CountMismatch {
            expected,
            generated,
        });
    }
    if witness.is_none() {
        debug!("task set is not dual-priority schedulable with rate-monotonic backgrounds");
    }
    Ok(witness)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;

    #[test]
    fn general_search_finds_a_witness_for_a_feasible_set() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 4)]).unwrap();
        let witness = search_all_priorities(&set).unwrap().unwrap();
        assert_eq!(simulate(&set, &witness).unwrap(), None);
    }

    #[test]
    fn general_search_exhausts_an_overloaded_set() {
        // U = 1.5 over 24 priority permutations of 9-tuple spaces each
        let set = TaskSet::from_pairs(&[(2, 2), (1, 2)]).unwrap();
        assert!(search_all_priorities(&set).unwrap().is_none());
    }

    #[test]
    fn rm_search_finds_a_witness_for_a_feasible_set() {
        let set = TaskSet::from_pairs(&[(1, 2), (1, 4)]).unwrap();
        let witness = search_rm_priorities(&set).unwrap().unwrap();

        // Rate-monotonic backgrounds: ascending with task index
        let policies = witness.policies();
        assert!(policies[0].background < policies[1].background);
        assert_eq!(simulate(&set, &witness).unwrap(), None);
    }

    #[test]
    fn rm_search_exhausts_an_overloaded_set() {
        let set = TaskSet::from_pairs(&[(2, 2), (1, 2)]).unwrap();
        assert!(search_rm_priorities(&set).unwrap().is_none());
    }

    #[test]
    fn rm_search_rejects_unsorted_task_sets() {
        let set = TaskSet::from_pairs(&[(1, 4), (1, 2)]).unwrap();
        let err = search_rm_priorities(&set).unwrap_err();
        assert!(matches!(err, SearchError::NotSortedByPeriod { task: 1 }));
    }

    #[test]
    fn both_searches_agree_on_a_schedulable_set() {
        let set = TaskSet::from_pairs(&[(1, 3), (1, 3), (1, 3)]).unwrap();
        assert!(search_all_priorities(&set).unwrap().is_some());
        assert!(search_rm_priorities(&set).unwrap().is_some());
    }
}
