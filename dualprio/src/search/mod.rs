//! Schedulability searches over the dual-priority configuration space.
//!
//! Three strategies of increasing cost:
//!
//! | Strategy | Space | Complete? |
//! |---|---|---|
//! | [`fdms`] | at most `Σ Tᵢ` simulations | no (heuristic) |
//! | [`search_phase_change_points`] | `Π (Tᵢ + 1)` tuples | yes, for fixed priorities |
//! | [`search_all_priorities`] / [`search_rm_priorities`] | `(2N)!` / `(2N)!/N!` assignments | yes |
//!
//! All of them answer exactly: `Ok(Some(assignment))` with a witness that
//! simulates clean over the hyperperiod, `Ok(None)` when the searched space
//! holds no such witness.  The exhaustive searches cross-check their visit
//! counts against closed-form totals and refuse to report exhaustion on a
//! mismatch.

pub mod enumerate;
pub mod error;
pub mod fdms;
pub mod phase;
pub mod priority;

pub use enumerate::{falling_factorial, tuple_count, Enumeration, Step};
pub use error::SearchError;
pub use fdms::fdms;
pub use phase::search_phase_change_points;
pub use priority::{search_all_priorities, search_rm_priorities};
