//! Property-based soundness tests for the enumeration and simulation cores.
//!
//! Run with: `cargo test --test property`

mod enumeration;
mod simulation;
