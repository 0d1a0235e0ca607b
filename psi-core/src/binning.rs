// psi-core/src/binning.rs
//! Bin specifications and the bin edges derived from the expected sample.
//!
//! Edges are computed once, from the expected sample, and reused verbatim for
//! the actual sample. The first interval is closed on both ends, every later
//! interval is `(lo, hi]`.
//!
//! License: MIT OR Apache-2.0

use log::{debug, warn};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use psi_stats::edges::{
    equal_width_edges, is_strictly_increasing, locate, merge_collapsed, quantile_edges,
};
use psi_stats::rounding::MAX_PRECISION;
use psi_stats::statistics::{compute_range, sorted_values};

use crate::category::Category;
use crate::errors::PsiError;

/// Strategy for deriving bin edges from numeric data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinningMode {
    /// Equal-width intervals over the expected sample's range.
    Equidistant,
    /// Intervals at the expected sample's empirical quantiles.
    Quantile,
}

impl FromStr for BinningMode {
    type Err = PsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equidistant" => Ok(BinningMode::Equidistant),
            "quantile" | "quantiles" => Ok(BinningMode::Quantile),
            other => Err(PsiError::config(format!(
                "unknown binning mode '{}'; expected 'equidistant' or 'quantile'",
                other
            ))),
        }
    }
}

impl fmt::Display for BinningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinningMode::Equidistant => write!(f, "equidistant"),
            BinningMode::Quantile => write!(f, "quantile"),
        }
    }
}

/// Message reported when a `bins` setting is neither a count nor a list.
pub const BINS_FORMAT_MESSAGE: &str =
    "bins must be an integer count or a list of break points";

/// Either a number of bins or explicit break points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bins {
    /// Number of intervals to derive.
    Count(usize),
    /// Strictly increasing edges, used as they are.
    Breaks(Vec<f64>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBins {
    Count(usize),
    Breaks(Vec<f64>),
}

impl<'de> Deserialize<'de> for Bins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawBins::deserialize(deserializer) {
            Ok(RawBins::Count(count)) => Ok(Bins::Count(count)),
            Ok(RawBins::Breaks(breaks)) => Ok(Bins::Breaks(breaks)),
            Err(_) => Err(de::Error::custom(PsiError::config(BINS_FORMAT_MESSAGE))),
        }
    }
}

impl From<usize> for Bins {
    fn from(count: usize) -> Self {
        Bins::Count(count)
    }
}

impl From<Vec<f64>> for Bins {
    fn from(breaks: Vec<f64>) -> Self {
        Bins::Breaks(breaks)
    }
}

/// Edges derived from the expected sample, with the label of every interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEdges {
    edges: Vec<f64>,
    labels: Vec<String>,
    merged: usize,
}

impl BinEdges {
    /// Uses caller-supplied break points directly as edges.
    pub fn from_breaks(breaks: &[f64], precision: usize) -> Result<Self, PsiError> {
        if !is_strictly_increasing(breaks) {
            return Err(PsiError::config(format!(
                "break points must hold at least two strictly increasing values, got {:?}",
                breaks
            )));
        }
        Ok(Self::labelled(breaks.to_vec(), 0, precision))
    }

    /// Equal-width edges over the range of `values`.
    ///
    /// Returns `Ok(None)` when `values` holds no number at all, and an error
    /// when the edges cannot be represented as finite floats.
    pub fn equidistant(
        values: &[f64],
        count: usize,
        precision: usize,
    ) -> Result<Option<Self>, PsiError> {
        let Some(range) = compute_range(values) else {
            return Ok(None);
        };
        let raw = equal_width_edges(range.min, range.max, count);
        debug!(
            "Equidistant edges over [{}, {}] with {} bins: {:?}",
            range.min, range.max, count, raw
        );
        if raw.iter().any(|edge| !edge.is_finite()) {
            return Err(PsiError::config(format!(
                "equidistant edges over [{}, {}] are not finite: {:?}",
                range.min, range.max, raw
            )));
        }
        Ok(Some(Self::merged(raw, precision)))
    }

    /// Edges at the empirical quantiles of `values`.
    ///
    /// Returns `None` when `values` holds no number at all.
    pub fn quantile(values: &[f64], count: usize, precision: usize) -> Option<Self> {
        let sorted = sorted_values(values);
        if sorted.is_empty() {
            return None;
        }
        let raw = quantile_edges(&sorted, count);
        debug!("Quantile edges with {} bins: {:?}", count, raw);
        Some(Self::merged(raw, precision))
    }

    fn merged(raw: Vec<f64>, precision: usize) -> Self {
        let requested = raw.len().saturating_sub(1);
        let merged = merge_collapsed(&raw, precision);
        if merged.dropped > 0 {
            warn!(
                "{} bin edge(s) collapsed at precision {}; using {} bin(s) instead of {}.",
                merged.dropped,
                precision,
                merged.edges.len().saturating_sub(1),
                requested
            );
        }
        Self::labelled(merged.edges, merged.dropped, precision)
    }

    fn labelled(edges: Vec<f64>, merged: usize, precision: usize) -> Self {
        let labels = interval_labels(&edges, precision);
        Self { edges, labels, merged }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of intervals.
    pub fn bin_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges dropped because they collapsed at the label precision.
    pub fn merged_edges(&self) -> usize {
        self.merged
    }

    /// Category of a number: its interval, or out of range.
    pub fn categorize(&self, value: f64) -> Category {
        match locate(&self.edges, value) {
            Some(index) => Category::Interval {
                index,
                label: self.labels[index].clone(),
            },
            None => Category::OutOfRange,
        }
    }

    /// True when every value lies within `[min_edge, max_edge]`.
    pub fn covers(&self, values: &[f64]) -> bool {
        values.iter().all(|&v| locate(&self.edges, v).is_some())
    }
}

/// Formats interval labels at `precision` decimals.
///
/// When distinct edges would print identically, the label precision is raised
/// (up to `MAX_PRECISION`) until they no longer do.
fn interval_labels(edges: &[f64], precision: usize) -> Vec<String> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let mut digits = precision.min(MAX_PRECISION);
    while digits < MAX_PRECISION && !labels_distinct(edges, digits) {
        digits += 1;
    }
    if digits != precision {
        debug!("Raised label precision from {} to {} to keep labels distinct.", precision, digits);
    }

    edges
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let open = if i == 0 { '[' } else { '(' };
            format!("{}{:.*}, {:.*}]", open, digits, pair[0], digits, pair[1])
        })
        .collect()
}

fn labels_distinct(edges: &[f64], digits: usize) -> bool {
    edges.windows(2).all(|pair| {
        pair[0] == pair[1] || format!("{:.*}", digits, pair[0]) != format!("{:.*}", digits, pair[1])
    })
}

/// Derives the edges used to bin both samples from the expected sample.
///
/// Returns `Ok(None)` when counting bins over an expected sample without
/// any number; every expected value is then missing.
pub fn derive_edges(
    mode: Option<BinningMode>,
    bins: Option<&Bins>,
    expected: &[f64],
    precision: usize,
) -> Result<Option<BinEdges>, PsiError> {
    let edges = match (mode, bins) {
        (None, None) | (None, Some(Bins::Count(_))) => {
            return Err(PsiError::config(
                "explicit break points are required when no binning mode is given",
            ));
        }
        (Some(BinningMode::Quantile), Some(Bins::Breaks(_))) => {
            return Err(PsiError::config(
                "quantile binning requires an integer number of bins",
            ));
        }
        (_, Some(Bins::Breaks(breaks))) => {
            let edges = BinEdges::from_breaks(breaks, precision)?;
            if !edges.covers(expected) {
                return Err(PsiError::config(format!(
                    "break points {:?} do not cover every value of the expected sample",
                    breaks
                )));
            }
            Some(edges)
        }
        (Some(_), None) => {
            return Err(PsiError::config("numeric binning requires `bins`"));
        }
        (Some(_), Some(Bins::Count(0))) => {
            return Err(PsiError::config("the number of bins must be at least 1"));
        }
        (Some(mode), Some(Bins::Count(count))) => {
            if expected.iter().any(|v| v.is_infinite()) {
                return Err(PsiError::config(format!(
                    "{} binning needs finite values in the expected sample",
                    mode
                )));
            }
            match mode {
                BinningMode::Equidistant => BinEdges::equidistant(expected, *count, precision)?,
                BinningMode::Quantile => BinEdges::quantile(expected, *count, precision),
            }
        }
    };
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binning_mode_from_str() {
        assert_eq!("equidistant".parse::<BinningMode>(), Ok(BinningMode::Equidistant));
        assert_eq!("Quantiles".parse::<BinningMode>(), Ok(BinningMode::Quantile));
        assert!(matches!(
            "kmeans".parse::<BinningMode>(),
            Err(PsiError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_equidistant_labels() {
        let edges = BinEdges::equidistant(&[1.0, 7.0, 4.0], 3, 3).unwrap().unwrap();
        assert_eq!(edges.edges(), &[1.0, 3.0, 5.0, 7.0]);
        assert_eq!(
            edges.labels(),
            &["[1.000, 3.000]", "(3.000, 5.000]", "(5.000, 7.000]"]
        );
        assert_eq!(edges.merged_edges(), 0);
    }

    #[test]
    fn test_equidistant_over_huge_range() {
        let edges = BinEdges::equidistant(&[-1e308, 0.0, 1e308], 3, 3).unwrap().unwrap();
        assert_eq!(edges.bin_count(), 3);
        assert_eq!(edges.edges()[0], -1e308);
        assert!(edges.edges().iter().all(|e| e.is_finite()));
        assert!(matches!(edges.categorize(0.0), Category::Interval { index: 1, .. }));
    }

    #[test]
    fn test_equidistant_rejects_non_finite_edges() {
        // Widening a single f64::MAX value overflows the upper edge.
        assert!(matches!(
            BinEdges::equidistant(&[f64::MAX], 2, 3),
            Err(PsiError::ConfigurationError(_))
        ));
        assert_eq!(BinEdges::equidistant(&[f64::NAN], 2, 3), Ok(None));
    }

    #[test]
    fn test_categorize_boundaries() {
        let edges = BinEdges::from_breaks(&[0.0, 1.0, 2.0], 1).unwrap();
        assert_eq!(edges.categorize(0.0), Category::Interval { index: 0, label: "[0.0, 1.0]".into() });
        assert_eq!(edges.categorize(1.0), Category::Interval { index: 0, label: "[0.0, 1.0]".into() });
        assert_eq!(edges.categorize(1.5), Category::Interval { index: 1, label: "(1.0, 2.0]".into() });
        assert_eq!(edges.categorize(2.5), Category::OutOfRange);
        assert_eq!(edges.categorize(-0.1), Category::OutOfRange);
    }

    #[test]
    fn test_from_breaks_rejects_unordered() {
        assert!(BinEdges::from_breaks(&[1.0], 3).is_err());
        assert!(BinEdges::from_breaks(&[1.0, 1.0], 3).is_err());
        assert!(BinEdges::from_breaks(&[2.0, 1.0], 3).is_err());
    }

    #[test]
    fn test_label_precision_is_raised_for_close_breaks() {
        let edges = BinEdges::from_breaks(&[0.0, 0.0001, 0.0002], 3).unwrap();
        assert_eq!(edges.bin_count(), 2);
        assert_eq!(edges.labels(), &["[0.0000, 0.0001]", "(0.0001, 0.0002]"]);
    }

    #[test]
    fn test_quantile_merges_duplicate_edges() {
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0];
        let edges = BinEdges::quantile(&values, 4, 3).unwrap();
        // quartiles: 1, 1, 1, 1.25, 3 -> 1, 1.25, 3
        assert_eq!(edges.edges(), &[1.0, 1.25, 3.0]);
        assert_eq!(edges.merged_edges(), 2);
    }

    #[test]
    fn test_derive_edges_configuration_errors() {
        let data = [1.0, 2.0, 3.0];
        let is_config_err = |r: Result<Option<BinEdges>, PsiError>| {
            matches!(r, Err(PsiError::ConfigurationError(_)))
        };
        assert!(is_config_err(derive_edges(None, Some(&Bins::Count(3)), &data, 3)));
        assert!(is_config_err(derive_edges(None, None, &data, 3)));
        assert!(is_config_err(derive_edges(
            Some(BinningMode::Quantile),
            Some(&Bins::Breaks(vec![0.0, 5.0])),
            &data,
            3
        )));
        assert!(is_config_err(derive_edges(Some(BinningMode::Equidistant), None, &data, 3)));
        assert!(is_config_err(derive_edges(
            Some(BinningMode::Equidistant),
            Some(&Bins::Count(0)),
            &data,
            3
        )));
        assert!(is_config_err(derive_edges(
            None,
            Some(&Bins::Breaks(vec![1.5, 5.0])),
            &data,
            3
        )));
        assert!(is_config_err(derive_edges(
            Some(BinningMode::Equidistant),
            Some(&Bins::Count(3)),
            &[1.0, f64::INFINITY],
            3
        )));
    }

    #[test]
    fn test_derive_edges_breaks_without_mode() {
        let edges = derive_edges(None, Some(&Bins::Breaks(vec![0.0, 2.0, 4.0])), &[1.0, 3.0], 3)
            .unwrap()
            .unwrap();
        assert_eq!(edges.edges(), &[0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_derive_edges_without_numbers() {
        let edges = derive_edges(Some(BinningMode::Equidistant), Some(&Bins::Count(3)), &[], 3).unwrap();
        assert!(edges.is_none());
    }
}
