/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{error, info};

use dualprio::analysis::{self, Verdict};
use dualprio::config::Workload;
use dualprio::scenario::{self, Scenario};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Dual-priority schedulability verifier.
///
/// Example:
///   dualprio scenario 3
///   dualprio check workloads/counterexample3_fdms.yaml
#[derive(Debug, Parser)]
#[command(
    name = "dualprio",
    about = "Dual-priority schedulability verifier – Rust implementation",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace).  RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Re-verify one of the published counterexamples.
    Scenario {
        /// Counterexample number.
        #[arg(
            value_parser = clap::value_parser!(u8).range(1..=3),
            required_unless_present = "list",
            conflicts_with = "list"
        )]
        number: Option<u8>,

        /// List the counterexamples and their runtime costs instead of running one.
        #[arg(short, long, default_value_t = false)]
        list: bool,
    },

    /// Analyse a workload described in a YAML file.
    Check {
        /// Path to the YAML workload file.
        file: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Initialise structured logging.
    // RUST_LOG wins when set (e.g. RUST_LOG=dualprio=trace); otherwise the
    // -v flags pick the default level.
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let outcome = match cli.command {
        Command::Scenario { number: Some(n), .. } => run_scenario(n),
        Command::Scenario { .. } => {
            print_scenarios();
            Ok(true)
        }
        Command::Check { file } => run_check(&file),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn print_scenarios() {
    info!("Available counterexamples:");
    for scenario in Scenario::all() {
        info!(
            "  [{number}]  {description}",
            number = scenario.number(),
            description = scenario.description(),
        );
        info!("       cost: {}", scenario.cost_note());
    }
}

/// Returns `Ok(true)` when every published claim was reproduced.
fn run_scenario(number: u8) -> Result<bool> {
    let scenario = Scenario::from_number(number)
        .with_context(|| format!("no counterexample numbered {number}"))?;
    let report = scenario::run(scenario)
        .with_context(|| format!("verification of counterexample {number} aborted"))?;

    for claim in &report.claims {
        if claim.holds {
            info!("  [ok] {}", claim.claim);
        } else {
            error!("  [FAILED] {}", claim.claim);
        }
    }
    if report.verified() {
        info!("Counterexample {} verified", report.scenario.number());
    } else {
        error!("Counterexample {} NOT reproduced", report.scenario.number());
    }
    Ok(report.verified())
}

/// Returns `Ok(true)` when the workload's analysis finds a schedulable
/// configuration.
fn run_check(path: &Path) -> Result<bool> {
    let Workload { set, request } = Workload::load(path)?;
    let verdict = analysis::run(&set, request)
        .with_context(|| format!("analysis failed for {}", path.display()))?;

    match &verdict {
        Verdict::Schedulable { witness } => {
            info!("Schedulable; witness configuration:");
            for (i, policy) in witness.policies().iter().enumerate() {
                info!(
                    "  Task {i}: background={background} promoted={promoted} phase_change_point={point}",
                    background = policy.background,
                    promoted = policy.promoted,
                    point = policy.phase_change_point,
                );
            }
        }
        Verdict::Unschedulable {
            first_miss: Some(miss),
        } => {
            info!(
                "Unschedulable: task {} misses a deadline at time {}",
                miss.task, miss.at
            );
        }
        Verdict::Unschedulable { first_miss: None } => {
            info!("Unschedulable: search space exhausted without a witness");
        }
    }
    Ok(verdict.is_schedulable())
}
