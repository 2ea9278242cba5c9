/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic helpers: GCD and checked LCM.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of [`TaskSet`](crate::task::TaskSet) construction.

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during hyperperiod calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperperiodError {
    /// LCM calculation overflowed `u64`.
    ///
    /// Contains the two operands that caused the overflow so the caller can
    /// log a useful message.
    Overflow { a: u64, b: u64 },
}

impl std::fmt::Display for HyperperiodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperperiodError::Overflow { a, b } => {
                write!(f, "LCM overflow computing lcm({a}, {b})")
            }
        }
    }
}

impl std::error::Error for HyperperiodError {}

// ── Arithmetic ────────────────────────────────────────────────────────────────

/// Iterative Euclidean GCD.  Always returns `0` when either input is `0`.
///
/// The iterative form is preferred over the recursive one because it does not
/// risk a stack overflow for very large inputs.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Checked LCM: returns `Err(HyperperiodError::Overflow { a, b })` if the
/// result would overflow `u64`.
///
/// Uses the overflow-safe formulation `(a / gcd(a, b)) * b` — the division
/// happens first, making overflow far less likely — but the final
/// multiplication is still checked with `checked_mul`.
///
/// Returns `Ok(0)` when either input is `0`, matching standard LCM convention.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }

    let g = gcd(a, b);
    // a / g is exact (g divides a by definition)
    let reduced = a / g;

    reduced
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Reduce a slice of periods to their overall LCM.
///
/// Returns:
/// * `Ok(0)` for an empty slice.
/// * `Err` on the first overflow encountered.
pub fn lcm_of_slice(periods: &[u64]) -> Result<u64, HyperperiodError> {
    periods
        .iter()
        .try_fold(periods.first().copied().unwrap_or(0), |acc, &p| lcm(acc, p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
