//! Workload file loading.
//!
//! A workload file describes one task set and one analysis to run on it.
//! The expected YAML structure is:
//! ```yaml
//! analysis: simulate
//! tasks:
//!   - { wcet: 6, period: 11 }
//!   - { wcet: 6, period: 20 }
//!   - { wcet: 4, period: 46 }
//!   - { wcet: 5, period: 74 }
//! priorities:
//!   - { background: 4, promoted: 0 }
//!   - { background: 5, promoted: 1 }
//!   - { background: 6, promoted: 2 }
//!   - { background: 7, promoted: 3 }
//! phase_change_points: [5, 3, 25, 35]
//! ```
//!
//! `analysis` selects the strategy (`simulate`, `fdms`, `phase-change-points`,
//! `all-priorities`, `rm-priorities`).  `priorities` is required by the first
//! three, `phase_change_points` by `simulate` only; sections a strategy does
//! not use must be absent so a file never silently ignores part of its input.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::analysis::AnalysisRequest;
use crate::policy::{Assignment, Priority, PriorityPair};
use crate::task::{TaskSet, Time};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// This is kept private – callers work with [`Workload`] instead.
#[derive(Debug, Deserialize)]
struct WorkloadFile {
    analysis: AnalysisKind,
    tasks: Vec<TaskEntry>,
    #[serde(default)]
    priorities: Option<Vec<PairEntry>>,
    #[serde(default)]
    phase_change_points: Option<Vec<Time>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum AnalysisKind {
    Simulate,
    Fdms,
    PhaseChangePoints,
    AllPriorities,
    RmPriorities,
}

#[derive(Debug, Deserialize)]
struct TaskEntry {
    wcet: Time,
    period: Time,
}

#[derive(Debug, Deserialize)]
struct PairEntry {
    background: Priority,
    promoted: Priority,
}

// ── Public data structures ────────────────────────────────────────────────────

/// A task set plus the analysis to run on it, ready for
/// [`analysis::run`](crate::analysis::run).
#[derive(Debug, Clone)]
pub struct Workload {
    pub set: TaskSet,
    pub request: AnalysisRequest,
}

impl Workload {
    /// Parses `path` into a validated workload.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is structurally
    /// invalid, the task set violates the model (zero cost or period), or the
    /// sections present do not match what the selected analysis needs.
    pub fn load(path: &Path) -> Result<Workload> {
        info!("Loading workload from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open workload file: {}", path.display()))?;
        let file: WorkloadFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let pairs: Vec<(Time, Time)> = file.tasks.iter().map(|t| (t.wcet, t.period)).collect();
        let set = TaskSet::from_pairs(&pairs)
            .with_context(|| format!("Invalid task set in {}", path.display()))?;
        for (i, task) in set.tasks().iter().enumerate() {
            debug!("  Task {}: wcet={} period={}", i, task.wcet, task.period);
        }

        let request =
            build_request(&set, file.analysis, file.priorities, file.phase_change_points)?;
        info!(
            strategy = request.strategy(),
            tasks = set.len(),
            hyper_period = set.hyper_period(),
            "workload loaded"
        );
        Ok(Workload { set, request })
    }
}

// ── Cross-field validation ────────────────────────────────────────────────────

fn build_request(
    set: &TaskSet,
    kind: AnalysisKind,
    priorities: Option<Vec<PairEntry>>,
    points: Option<Vec<Time>>,
) -> Result<AnalysisRequest> {
    match kind {
        AnalysisKind::Simulate => {
            let pairs = required_priorities(set, priorities, "simulate")?;
            let points =
                points.context("`simulate` requires a `phase_change_points` list")?;
            if points.len() != set.len() {
                bail!(
                    "expected {} phase change points, found {}",
                    set.len(),
                    points.len()
                );
            }
            let assignment = Assignment::from_parts(&pairs, &points);
            assignment
                .validate(set)
                .context("invalid assignment for this task set")?;
            Ok(AnalysisRequest::Simulate { assignment })
        }
        AnalysisKind::Fdms => {
            forbid_points(&points, "fdms")?;
            let priorities = required_priorities(set, priorities, "fdms")?;
            Ok(AnalysisRequest::Fdms { priorities })
        }
        AnalysisKind::PhaseChangePoints => {
            forbid_points(&points, "phase-change-points")?;
            let priorities = required_priorities(set, priorities, "phase-change-points")?;
            Ok(AnalysisRequest::PhaseChangePoints { priorities })
        }
        AnalysisKind::AllPriorities => {
            forbid_priorities(&priorities, "all-priorities")?;
            forbid_points(&points, "all-priorities")?;
            Ok(AnalysisRequest::AllPriorities)
        }
        AnalysisKind::RmPriorities => {
            forbid_priorities(&priorities, "rm-priorities")?;
            forbid_points(&points, "rm-priorities")?;
            Ok(AnalysisRequest::RmPriorities)
        }
    }
}

fn required_priorities(
    set: &TaskSet,
    priorities: Option<Vec<PairEntry>>,
    kind: &str,
) -> Result<Vec<PriorityPair>> {
    let entries =
        priorities.with_context(|| format!("`{kind}` requires a `priorities` list"))?;
    if entries.len() != set.len() {
        bail!(
            "expected {} priority pairs, found {}",
            set.len(),
            entries.len()
        );
    }
    Ok(entries
        .into_iter()
        .map(|e| PriorityPair::new(e.background, e.promoted))
        .collect())
}

fn forbid_priorities(priorities: &Option<Vec<PairEntry>>, kind: &str) -> Result<()> {
    if priorities.is_some() {
        bail!("`priorities` is not used by `{kind}`; remove the section");
    }
    Ok(())
}

fn forbid_points(points: &Option<Vec<Time>>, kind: &str) -> Result<()> {
    if points.is_some() {
        bail!("`phase_change_points` is not used by `{kind}`; remove the section");
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
