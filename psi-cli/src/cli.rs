// psi-cli/src/cli.rs
//! This file defines the command-line interface (CLI) for the psi application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "psi",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Measure distribution drift with the Population Stability Index",
    long_about = "psi compares an actual sample against an expected (reference) sample and reports the Population Stability Index together with the frequency table it was computed from. Numeric samples are binned with edges derived from the expected sample; categorical samples use every distinct value as a category.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `psi` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Computes the PSI of an actual sample against an expected sample.
    #[command(about = "Computes the PSI of an actual sample against an expected sample.")]
    Compute(ComputeCommand),

    /// Replays the reference scenarios.
    #[command(about = "Replays the reference scenarios on built-in data.")]
    Demo,

    /// Lists the named profiles found on this machine.
    #[command(about = "Lists the named PSI profiles found on this machine.")]
    Profiles,
}

/// Arguments for the `compute` command.
#[derive(Parser, Debug, Clone)]
pub struct ComputeCommand {
    /// Expected (reference) sample.
    #[arg(long, short = 'e', value_name = "FILE", help = "File holding the expected (reference) sample.")]
    pub expected: PathBuf,

    /// Actual (comparison) sample.
    #[arg(long, short = 'a', value_name = "FILE", help = "File holding the actual (comparison) sample.")]
    pub actual: PathBuf,

    #[arg(long, value_enum, value_name = "MODE", help = "Binning mode for numeric data.")]
    pub mode: Option<ModeChoice>,

    #[arg(long, short = 'b', value_name = "N", conflicts_with = "breaks", help = "Number of bins for numeric data.")]
    pub bins: Option<usize>,

    #[arg(
        long,
        value_name = "A,B,C",
        value_delimiter = ',',
        allow_hyphen_values = true,
        help = "Explicit, strictly increasing bin edges (comma-separated)."
    )]
    pub breaks: Option<Vec<f64>>,

    #[arg(long = "force-categorical", short = 'c', help = "Treat every distinct value as its own category.")]
    pub force_categorical: bool,

    #[arg(long, value_name = "F", help = "Frequency substituted for empty categories.")]
    pub regulariser: Option<f64>,

    #[arg(long, short = 'p', value_name = "N", help = "Decimals used in bin labels.")]
    pub precision: Option<usize>,

    /// Path to a PSI configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a PSI configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Loads a named profile, or a profile file.
    #[arg(long = "profile", value_name = "NAME", help = "Loads a named profile from the local configuration.")]
    pub profile: Option<String>,

    #[arg(long, value_name = "NAME", help = "Column to use when a sample file holds several.")]
    pub column: Option<String>,

    #[arg(long, value_name = "CHAR", default_value_t = ',', help = "Field delimiter of text sample files.")]
    pub delimiter: char,

    #[arg(long, help = "Text sample files start with a header line.")]
    pub header: bool,

    #[arg(long, help = "Print the report as JSON to stdout.")]
    pub json: bool,

    /// Exit with a non-zero code if the PSI exceeds this threshold.
    #[arg(long = "fail-over", value_name = "F", help = "Exit with a non-zero code if the PSI exceeds this threshold.")]
    pub fail_over: Option<f64>,
}

/// Binning mode as given on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeChoice {
    /// Equal-width bins over the expected sample's range.
    Equidistant,
    /// Bins at the expected sample's quantiles.
    Quantile,
    /// No derived bins; `--breaks` is required.
    None,
}

impl ModeChoice {
    /// The configuration-file spelling of the mode.
    pub fn as_config_str(&self) -> &'static str {
        match self {
            ModeChoice::Equidistant => "equidistant",
            ModeChoice::Quantile => "quantile",
            ModeChoice::None => psi_core::config::NO_BINNING_MODE,
        }
    }
}
