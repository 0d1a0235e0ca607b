// psi-cli/src/logger.rs
//! `env_logger` setup for the `psi` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Initializes logging to stderr.
///
/// `RUST_LOG` is honored unless `level` forces a filter (`--quiet`, `--debug`).
/// Records print as `[LEVEL target] message`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });
    // A logger may already be installed (tests).
    let _ = builder.try_init();
}
