/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the search engines.
//!
//! Heuristic failure ("no schedulable configuration exists") is **not** an
//! error — the engines report it as `Ok(None)`.  These variants cover broken
//! inputs and, in the case of [`SearchError::CountMismatch`], a broken
//! engine: the exhaustive searches re-derive their enumeration count in
//! closed form and refuse to report "unschedulable" from an enumeration that
//! provably skipped configurations.

use thiserror::Error;

use crate::policy::ConfigError;

/// Top-level error type returned by the search engines.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A trial configuration did not fit the task set.
    ///
    /// Enumerated configurations always fit; this surfaces broken
    /// hand-written inputs passed to the engines.
    #[error("invalid trial configuration: {0}")]
    Config(#[from] ConfigError),

    /// An exhaustive search finished without visiting exactly the closed-form
    /// number of configurations.
    ///
    /// This indicates a defect in the enumeration itself, so the search
    /// result cannot be trusted as a proof of unschedulability.
    #[error(
        "enumeration self-check failed: visited {generated} configurations but expected {expected}"
    )]
    CountMismatch { expected: u128, generated: u128 },

    /// The closed-form configuration count does not fit in `u128`, so the
    /// exhaustion self-check cannot be performed.
    #[error("configuration count overflows u128")]
    CountOverflow,

    /// The rate-monotonic search requires tasks sorted by non-decreasing
    /// period; `task` is the first index that breaks the order.
    #[error("task {task} breaks the non-decreasing period order required by the rate-monotonic search")]
    NotSortedByPeriod { task: usize },
}
