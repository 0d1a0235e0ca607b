// psi-cli/src/main.rs
//! `psi` entry point.

use clap::Parser;
use log::{info, warn, LevelFilter};
use std::process::ExitCode;

use psi_cli::cli::{Cli, Commands};
use psi_cli::commands::{compute, demo, error_msg, profiles};
use psi_cli::logger;
use psi_cli::ui::theme::{build_theme_map, ThemeStyle};
use psi_cli::{EXIT_DRIFT_DETECTED, EXIT_FAILURE};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("psi started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme_map = build_theme_map(cli.theme.as_ref()).unwrap_or_else(|e| {
        warn!("{:#}; falling back to the default theme.", e);
        ThemeStyle::default_theme_map()
    });

    let result = match &cli.command {
        Commands::Compute(cmd) => compute::run_compute(cmd, &theme_map, cli.quiet),
        Commands::Demo => demo::run_demo(&theme_map).map(|_| false),
        Commands::Profiles => profiles::run_list_profiles(&theme_map).map(|_| false),
    };

    match result {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_DRIFT_DETECTED),
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
