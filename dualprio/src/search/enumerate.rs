/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Generic recursive generators for the exhaustive searches.
//!
//! The search engines need three enumeration shapes:
//!
//! * all tuples from a rectangular space with per-position inclusive bounds
//!   (phase change points),
//! * all permutations of a value slice (priority slots),
//! * all increasing k-subsets of `0..pool` (rate-monotonic background
//!   priorities).
//!
//! Each generator walks its space depth-first with position 0 varying
//! slowest, calling a visitor per complete configuration.  The visitor can
//! stop the walk early ([`Step::Done`]) or fail it ([`Err`]); the generator
//! reports how many configurations were visited and whether the space was
//! exhausted, which is what the engines feed their count self-checks.
//!
//! Counts use `u128`: a tuple space of four periods around 200 already
//! overflows `u32`, and nothing here is hot enough for the width to matter.

use crate::policy::Priority;
use crate::task::Time;

use super::error::SearchError;

// ── Visitor protocol ──────────────────────────────────────────────────────────

/// Visitor verdict for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep enumerating.
    Continue,

    /// Stop the walk; the caller found what it was looking for.
    Done,
}

/// Result of a completed (or stopped) enumeration walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enumeration {
    /// Number of configurations the visitor saw.
    pub visited: u128,

    /// `true` if the space was exhausted, `false` if the visitor stopped the
    /// walk with [`Step::Done`].
    pub completed: bool,
}

// ── Tuple spaces ──────────────────────────────────────────────────────────────

/// Visit every tuple `x` with `0 <= x[i] <= bounds[i]`, in lexicographic
/// order with position 0 varying slowest.
///
/// An empty `bounds` slice yields exactly one visit of the empty tuple.
pub fn for_each_tuple<E>(
    bounds: &[Time],
    visit: &mut impl FnMut(&[Time]) -> Result<Step, E>,
) -> Result<Enumeration, E> {
    let mut current = vec![0; bounds.len()];
    let mut visited: u128 = 0;
    let completed = descend_tuple(bounds, &mut current, 0, visit, &mut visited)?;
    Ok(Enumeration { visited, completed })
}

fn descend_tuple<E>(
    bounds: &[Time],
    current: &mut [Time],
    depth: usize,
    visit: &mut impl FnMut(&[Time]) -> Result<Step, E>,
    visited: &mut u128,
) -> Result<bool, E> {
    if depth == bounds.len() {
        *visited += 1;
        return Ok(visit(current)? == Step::Continue);
    }
    for value in 0..=bounds[depth] {
        current[depth] = value;
        if !descend_tuple(bounds, current, depth + 1, visit, visited)? {
            return Ok(false);
        }
    }
    Ok(true)
}

// ── Permutations ──────────────────────────────────────────────────────────────

/// Visit every permutation of `values`.
///
/// At each depth the unused values are tried in slice order, so an ascending
/// input produces lexicographic permutations — the order the priority
/// searches rely on for reproducible progress logs.
pub fn for_each_permutation<E>(
    values: &[Priority],
    visit: &mut impl FnMut(&[Priority]) -> Result<Step, E>,
) -> Result<Enumeration, E> {
    let mut current = vec![0; values.len()];
    let mut used = vec![false; values.len()];
    let mut visited: u128 = 0;
    let completed = descend_permutation(values, &mut current, &mut used, 0, visit, &mut visited)?;
    Ok(Enumeration { visited, completed })
}

fn descend_permutation<E>(
    values: &[Priority],
    current: &mut [Priority],
    used: &mut [bool],
    depth: usize,
    visit: &mut impl FnMut(&[Priority]) -> Result<Step, E>,
    visited: &mut u128,
) -> Result<bool, E> {
    if depth == values.len() {
        *visited += 1;
        return Ok(visit(current)? == Step::Continue);
    }
    for i in 0..values.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current[depth] = values[i];
        let keep_going = descend_permutation(values, current, used, depth + 1, visit, visited)?;
        used[i] = false;
        if !keep_going {
            return Ok(false);
        }
    }
    Ok(true)
}

// ── Combinations ──────────────────────────────────────────────────────────────

/// Visit every strictly increasing `k`-subset of `0..pool`, in lexicographic
/// order.
pub fn for_each_combination<E>(
    k: usize,
    pool: usize,
    visit: &mut impl FnMut(&[Priority]) -> Result<Step, E>,
) -> Result<Enumeration, E> {
    debug_assert!(k <= pool, "cannot choose {k} values from a pool of {pool}");
    let mut current = vec![0; k];
    let mut visited: u128 = 0;
    let completed = descend_combination(k, pool, &mut current, 0, 0, visit, &mut visited)?;
    Ok(Enumeration { visited, completed })
}

fn descend_combination<E>(
    k: usize,
    pool: usize,
    current: &mut [Priority],
    depth: usize,
    start: usize,
    visit: &mut impl FnMut(&[Priority]) -> Result<Step, E>,
    visited: &mut u128,
) -> Result<bool, E> {
    if depth == k {
        *visited += 1;
        return Ok(visit(current)? == Step::Continue);
    }
    // Leave room for the remaining k - depth - 1 ascending values.
    for value in start..=(pool - (k - depth)) {
        current[depth] = value as Priority;
        if !descend_combination(k, pool, current, depth + 1, value + 1, visit, visited)? {
            return Ok(false);
        }
    }
    Ok(true)
}

// ── Closed-form counts ────────────────────────────────────────────────────────

/// Size of the tuple space enumerated by [`for_each_tuple`]:
/// `∏ (bounds[i] + 1)`.
pub fn tuple_count(bounds: &[Time]) -> Result<u128, SearchError> {
    bounds.iter().try_fold(1u128, |acc, &b| {
        acc.checked_mul(b as u128 + 1)
            .ok_or(SearchError::CountOverflow)
    })
}

/// Falling factorial `pool × (pool − 1) × … × (pool − slots + 1)`.
///
/// This counts ordered selections of `slots` distinct values from a pool:
/// `falling_factorial(m, m)` is `m!` (full permutations) and
/// `falling_factorial(2n, n)` is the rate-monotonic search space
/// `C(2n, n) · n!`.
pub fn falling_factorial(pool: usize, slots: usize) -> Result<u128, SearchError> {
    debug_assert!(slots <= pool);
    ((pool - slots + 1)..=pool).try_fold(1u128, |acc, factor| {
        acc.checked_mul(factor as u128)
            .ok_or(SearchError::CountOverflow)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
