/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! dualprio – dual-priority schedulability verifier
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task         – Task / TaskSet model, hyperperiod at construction
//! ├── hyperperiod  – GCD / checked LCM helpers
//! ├── policy       – per-trial dual-priority parameters (Assignment)
//! ├── sim          – one-hyperperiod discrete-time simulator
//! ├── search       – FDMS heuristic + exhaustive search engines
//! ├── analysis     – request/verdict façade over simulator and searches
//! ├── scenario     – the three published counterexample reproductions
//! └── config       – YAML workload file loading
//! ```

pub mod analysis;
pub mod config;
pub mod hyperperiod;
pub mod policy;
pub mod scenario;
pub mod search;
pub mod sim;
pub mod task;
