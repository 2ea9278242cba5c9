/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Entry point tying task sets, strategies and verdicts together.
//!
//! Callers describe *what* to decide with an [`AnalysisRequest`] and get back
//! a [`Verdict`].  The request owns whatever configuration fragments the
//! strategy needs (a full assignment to simulate, fixed priority pairs to
//! search phase change points under, or nothing at all for the priority
//! searches).

use tracing::{debug, info, warn};

use crate::policy::{Assignment, PriorityPair};
use crate::search::{
    fdms, search_all_priorities, search_phase_change_points, search_rm_priorities,
    SearchError,
};
use crate::sim::{DeadlineMiss, Simulator};
use crate::task::TaskSet;

// ── Request and verdict ───────────────────────────────────────────────────────

/// What to decide about a task set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Simulate one fully specified assignment over the hyperperiod.
    Simulate { assignment: Assignment },

    /// Run the FDMS phase-change-point heuristic under fixed priorities.
    Fdms { priorities: Vec<PriorityPair> },

    /// Exhaustively search phase change points under fixed priorities.
    PhaseChangePoints { priorities: Vec<PriorityPair> },

    /// Exhaustively search all priority assignments and phase change points.
    AllPriorities,

    /// Like [`AnalysisRequest::AllPriorities`] with background priorities
    /// restricted to rate-monotonic order.
    RmPriorities,
}

impl AnalysisRequest {
    /// Short strategy name for logs and reports.
    pub fn strategy(&self) -> &'static str {
        match self {
            AnalysisRequest::Simulate { .. } => "simulate",
            AnalysisRequest::Fdms { .. } => "fdms",
            AnalysisRequest::PhaseChangePoints { .. } => "phase-change-points",
            AnalysisRequest::AllPriorities => "all-priorities",
            AnalysisRequest::RmPriorities => "rm-priorities",
        }
    }
}

/// Outcome of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A configuration that meets every deadline over the hyperperiod.
    Schedulable { witness: Assignment },

    /// No schedulable configuration in the searched space.  For a plain
    /// simulation the first miss is reported; the searches exhaust their
    /// space without a single surviving candidate to blame.
    Unschedulable { first_miss: Option<DeadlineMiss> },
}

impl Verdict {
    pub fn is_schedulable(&self) -> bool {
        matches!(self, Verdict::Schedulable { .. })
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Decide `request` for `set`.
///
/// # Errors
/// [`SearchError`] when the request does not fit the task set (wrong slice
/// lengths, out-of-range phase change points, unsorted periods for the
/// rate-monotonic search) or an enumeration self-check fails.
pub fn run(set: &TaskSet, request: AnalysisRequest) -> Result<Verdict, SearchError> {
    info!(
        strategy = request.strategy(),
        tasks = set.len(),
        hyper_period = set.hyper_period(),
        "starting analysis"
    );
    for (i, task) in set.tasks().iter().enumerate() {
        debug!(
            task = i,
            wcet = task.wcet,
            period = task.period,
            utilization = task.utilization(),
            "task parameters"
        );
    }
    let utilization = set.total_utilization();
    if utilization > 1.0 {
        warn!(
            total_utilization = utilization,
            "task set is overloaded; no configuration can be schedulable"
        );
    }

    let verdict = match request {
        AnalysisRequest::Simulate { assignment } => {
            let mut sim = Simulator::new();
            match sim.run(set, &assignment)? {
                None => Verdict::Schedulable {
                    witness: assignment,
                },
                Some(miss) => Verdict::Unschedulable {
                    first_miss: Some(miss),
                },
            }
        }
        AnalysisRequest::Fdms { priorities } => to_verdict(fdms(set, &priorities)?),
        AnalysisRequest::PhaseChangePoints { priorities } => {
            to_verdict(search_phase_change_points(set, &priorities)?)
        }
        AnalysisRequest::AllPriorities => to_verdict(search_all_priorities(set)?),
        AnalysisRequest::RmPriorities => to_verdict(search_rm_priorities(set)?),
    };

    match &verdict {
        Verdict::Schedulable { witness } => {
            info!(policies = ?witness.policies(), "schedulable configuration found");
        }
        Verdict::Unschedulable { first_miss: Some(miss) } => {
            info!(task = miss.task, at = miss.at, "deadline miss");
        }
        Verdict::Unschedulable { first_miss: None } => {
            info!("no schedulable configuration exists in the searched space");
        }
    }
    Ok(verdict)
}

fn to_verdict(outcome: Option<Assignment>) -> Verdict {
    match outcome {
        Some(witness) => Verdict::Schedulable { witness },
        None => Verdict::Unschedulable { first_miss: None },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
