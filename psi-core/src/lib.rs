// psi-core/src/lib.rs
//! # PSI Core Library
//!
//! `psi-core` computes the Population Stability Index (PSI) between an
//! expected (reference) sample and an actual (comparison) sample. The index
//! measures how much a distribution has shifted:
//!
//! ```text
//! PSI = Σ (actual% - expected%) · ln(actual% / expected%)
//! ```
//!
//! summed over the categories observed in either sample. Numeric samples are
//! binned with edges derived from the expected sample only; categorical
//! samples use each distinct value as its own category. Missing values form a
//! category of their own.
//!
//! ## Modules
//!
//! * `sample`: Input values, table inputs and their normalization into samples.
//! * `category`: The categories frequencies are counted over.
//! * `binning`: Equidistant, quantile and explicit bin edges with interval labels.
//! * `frequency`: The expected/actual frequency table and its regularised PSI.
//! * `engine`: The `Categorizer` trait, `PsiOptions` and the `PsiEngine`.
//! * `categorizers`: Concrete numeric and categorical categorizers.
//! * `config`: YAML configuration, defaults and merging.
//! * `profiles`: Named configuration profiles looked up on disk.
//! * `severity`: Conventional stable/moderate/significant interpretation.
//! * `oneshot`: The `compute_psi` convenience function.
//!
//! ## Usage Example
//!
//! ```rust
//! use psi_core::{compute_psi, Bins, PsiOptions};
//!
//! let expected = vec![1.0, 2.0, 3.0, 3.0, 5.0, 4.0, 2.0, 2.0, 3.0];
//! let actual = vec![1.0, 2.0, 2.0, 3.0, 5.0, 4.0, 2.0, 6.0, 3.0];
//!
//! let options = PsiOptions::default().with_bins(Bins::Count(3));
//! let (psi, table) = compute_psi(expected, actual, &options).unwrap();
//!
//! assert!(psi >= 0.0);
//! for row in &table {
//!     println!("{}: {:.3} -> {:.3}", row.category, row.expected, row.actual);
//! }
//! ```
//!
//! ## Error Handling
//!
//! Computations return [`PsiError`]. Configuration and profile loading, which
//! touch the filesystem, return `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod binning;
pub mod categorizers;
pub mod category;
pub mod config;
pub mod engine;
pub mod errors;
pub mod frequency;
pub mod oneshot;
pub mod profiles;
pub mod sample;
pub mod severity;

/// Re-exports the input types.
pub use sample::{DataKind, Sample, SampleInput, Table, Value};

/// Re-exports the binning types.
pub use binning::{BinEdges, BinningMode, Bins};

pub use category::Category;
pub use errors::PsiError;
pub use frequency::{FrequencyRow, FrequencyTable};

/// Re-exports the engine and its options.
pub use engine::{
    Categorizer, PsiEngine, PsiOptions, PsiReport, DEFAULT_BINS, DEFAULT_PRECISION,
    DEFAULT_REGULARISER,
};

/// Re-exports the configuration layer.
pub use config::{merge_config, BinningConfig, PsiConfig, SeverityConfig};

pub use profiles::{
    apply_profile_to_config, list_available_profiles, load_profile_by_name,
    profile_candidate_paths, ProfileConfig, ProfileSummary,
};

pub use severity::{DriftSeverity, SeverityThresholds};

/// Re-exports the one-shot entry point.
pub use oneshot::compute_psi;
