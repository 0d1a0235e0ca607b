//! Configuration management for `psi-core`.
//!
//! This module defines the YAML configuration of a PSI computation. It handles
//! deserialization, loading the embedded defaults, layering user settings on
//! top of them and turning the result into [`PsiOptions`].
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::binning::{BinningMode, Bins, BINS_FORMAT_MESSAGE};
use crate::engine::{PsiOptions, DEFAULT_PRECISION, DEFAULT_REGULARISER};
use crate::errors::PsiError;
use crate::severity::SeverityThresholds;

/// Binning mode value that disables derived bins; explicit breaks are then mandatory.
pub const NO_BINNING_MODE: &str = "none";

/// Binning section of the configuration.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BinningConfig {
    /// `equidistant`, `quantile` (or `quantiles`), or `none`.
    pub mode: Option<String>,
    /// A bin count or a list of break points.
    pub bins: Option<Bins>,
}

/// Severity band thresholds.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SeverityConfig {
    pub moderate: Option<f64>,
    pub significant: Option<f64>,
}

/// Top-level configuration. Every field is optional so that a partial user
/// file can be layered over the defaults.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PsiConfig {
    pub binning: BinningConfig,
    pub force_categorical: Option<bool>,
    pub regulariser: Option<f64>,
    pub precision: Option<usize>,
    pub severity: SeverityConfig,
}

impl PsiConfig {
    /// Loads a configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading PSI configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .to_options()
            .and_then(|options| options.validate())
            .with_context(|| format!("Invalid settings in config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the defaults from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default PSI configuration from embedded string...");
        let default_yaml = include_str!("../config/default_psi.yaml");
        Self::from_yaml(default_yaml).context("Failed to parse default configuration")
    }

    /// Parses a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        parse_yaml(text)
    }

    /// Resolves the configuration into computation options.
    ///
    /// Unset fields fall back to [`PsiOptions::default`].
    pub fn to_options(&self) -> Result<PsiOptions, PsiError> {
        let defaults = PsiOptions::default();
        let binning_mode = match self.binning.mode.as_deref() {
            None => defaults.binning_mode,
            Some(mode) if mode.trim().eq_ignore_ascii_case(NO_BINNING_MODE) => None,
            Some(mode) => Some(mode.parse::<BinningMode>()?),
        };

        Ok(PsiOptions {
            binning_mode,
            bins: self.binning.bins.clone().or(defaults.bins),
            force_categorical: self.force_categorical.unwrap_or(defaults.force_categorical),
            regulariser: self.regulariser.unwrap_or(DEFAULT_REGULARISER),
            precision: self.precision.unwrap_or(DEFAULT_PRECISION),
        })
    }

    /// Severity thresholds, falling back to the conventional 0.1 / 0.25 bands.
    pub fn severity_thresholds(&self) -> SeverityThresholds {
        let defaults = SeverityThresholds::default();
        SeverityThresholds {
            moderate: self.severity.moderate.unwrap_or(defaults.moderate),
            significant: self.severity.significant.unwrap_or(defaults.significant),
        }
    }
}

/// Parses a YAML document holding a configuration at its top level.
///
/// A malformed `binning.bins` node is reported as a
/// [`PsiError::ConfigurationError`] rather than a bare parse error.
pub(crate) fn parse_yaml<T: DeserializeOwned>(text: &str) -> Result<T> {
    let document: serde_yml::Value = serde_yml::from_str(text)?;
    if let Some(bins) = document.get("binning").and_then(|binning| binning.get("bins")) {
        if !bins.is_null() && serde_yml::from_value::<Bins>(bins.clone()).is_err() {
            return Err(PsiError::config(format!("{}, found {:?}", BINS_FORMAT_MESSAGE, bins)).into());
        }
    }
    Ok(serde_yml::from_value(document)?)
}

/// Layers user-defined settings over a base configuration.
///
/// Every field set in `user_config` wins; unset fields keep the base value.
pub fn merge_config(default_config: PsiConfig, user_config: Option<PsiConfig>) -> PsiConfig {
    let Some(user) = user_config else {
        debug!("No user configuration provided; using the base configuration.");
        return default_config;
    };

    let mut merged = default_config;
    if let Some(mode) = user.binning.mode {
        debug!("Overriding binning mode with user value: {}", mode);
        merged.binning.mode = Some(mode);
    }
    if let Some(bins) = user.binning.bins {
        debug!("Overriding bins with user value: {:?}", bins);
        merged.binning.bins = Some(bins);
    }
    if let Some(force) = user.force_categorical {
        merged.force_categorical = Some(force);
    }
    if let Some(regulariser) = user.regulariser {
        debug!("Overriding regulariser with user value: {}", regulariser);
        merged.regulariser = Some(regulariser);
    }
    if let Some(precision) = user.precision {
        merged.precision = Some(precision);
    }
    if let Some(moderate) = user.severity.moderate {
        merged.severity.moderate = Some(moderate);
    }
    if let Some(significant) = user.severity.significant {
        merged.severity.significant = Some(significant);
    }
    merged
}
