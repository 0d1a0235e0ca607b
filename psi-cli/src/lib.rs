// psi-cli/src/lib.rs
//! # PSI command-line application
//!
//! Loads two samples from disk, runs them through the `psi-core` engine and
//! renders the index with its frequency table, or replays the reference
//! scenarios with `psi demo`.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logger;
pub mod ui;

/// Exit code for any error.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code when the PSI exceeds `--fail-over`.
pub const EXIT_DRIFT_DETECTED: u8 = 2;
