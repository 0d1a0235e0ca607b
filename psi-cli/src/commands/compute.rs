// psi-cli/src/commands/compute.rs
//! The `compute` command: layer the configuration, load both samples, run the
//! engine and render the report.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};

use psi_core::config::{merge_config, BinningConfig, PsiConfig};
use psi_core::{apply_profile_to_config, load_profile_by_name, Bins, PsiEngine, PsiReport};

use crate::cli::ComputeCommand;
use crate::commands::{info_msg, warn_msg};
use crate::input::{load_sample, InputOptions};
use crate::ui::frequency_table::print_frequency_table;
use crate::ui::output_format::{format_psi, print_summary};
use crate::ui::theme::ThemeMap;

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
pub struct ComputeOutput<'a> {
    #[serde(flatten)]
    pub report: &'a PsiReport,
    pub regulariser: f64,
    pub threshold_exceeded: bool,
}

/// Settings given as flags; every unset flag leaves the layered value alone.
pub fn cli_overrides(cmd: &ComputeCommand) -> PsiConfig {
    let bins = match (&cmd.bins, &cmd.breaks) {
        (Some(count), _) => Some(Bins::Count(*count)),
        (None, Some(breaks)) => Some(Bins::Breaks(breaks.clone())),
        (None, None) => None,
    };
    PsiConfig {
        binning: BinningConfig {
            mode: cmd.mode.map(|m| m.as_config_str().to_string()),
            bins,
        },
        force_categorical: cmd.force_categorical.then_some(true),
        regulariser: cmd.regulariser,
        precision: cmd.precision,
        ..PsiConfig::default()
    }
}

/// Defaults, then the profile, then the config file, then the flags.
pub fn resolve_config(cmd: &ComputeCommand) -> Result<PsiConfig> {
    let mut config = PsiConfig::load_default()?;

    if let Some(name) = &cmd.profile {
        let profile = load_profile_by_name(name)
            .with_context(|| format!("Failed to load profile '{}'", name))?;
        info!("Using profile '{}'.", profile.profile_name);
        config = apply_profile_to_config(&profile, config);
    }

    if let Some(path) = &cmd.config {
        let user_config = PsiConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
        config = merge_config(config, Some(user_config));
    }

    Ok(merge_config(config, Some(cli_overrides(cmd))))
}

/// Runs the command. Returns `true` when the PSI exceeds `--fail-over`.
pub fn run_compute(cmd: &ComputeCommand, theme_map: &ThemeMap, quiet: bool) -> Result<bool> {
    info!("Starting PSI computation.");
    let config = resolve_config(cmd)?;
    debug!("Resolved configuration: {:?}", config);
    let engine = PsiEngine::from_config(&config).context("Invalid PSI settings")?;

    let input_options = InputOptions {
        delimiter: cmd.delimiter,
        header: cmd.header,
        column: cmd.column.clone(),
    };
    let expected = load_sample(&cmd.expected, &input_options)
        .with_context(|| format!("Failed to load expected sample {}", cmd.expected.display()))?;
    let actual = load_sample(&cmd.actual, &input_options)
        .with_context(|| format!("Failed to load actual sample {}", cmd.actual.display()))?;

    let report = engine.evaluate(expected, actual).context("PSI computation failed")?;
    let regulariser = engine.options().regulariser;

    // NaN never exceeds a threshold.
    let threshold_exceeded = cmd.fail_over.is_some_and(|limit| report.psi > limit);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        let output = ComputeOutput {
            report: &report,
            regulariser,
            threshold_exceeded,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        writeln!(writer, "{}", json)?;
    } else {
        let supports_color = stdout.is_terminal();
        print_summary(&mut writer, &report, theme_map, supports_color)?;
        print_frequency_table(&mut writer, &report, regulariser, theme_map, supports_color)?;
    }

    if report.is_undefined() && !quiet {
        info_msg("One of the samples is empty; the PSI is undefined.", theme_map);
    }
    if let (true, Some(limit)) = (threshold_exceeded, cmd.fail_over) {
        warn_msg(
            format!("PSI {} exceeds the threshold {}.", format_psi(report.psi), limit),
            theme_map,
        );
    }

    info!("PSI computation completed.");
    Ok(threshold_exceeded)
}
