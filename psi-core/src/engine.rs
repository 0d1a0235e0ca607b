// psi-core/src/engine.rs
//! Defines the `Categorizer` trait and the PSI engine built on top of it.
//!
//! A computation runs in three steps: the two samples are normalized, every
//! element is mapped onto a category using one scheme derived from the
//! expected sample, and the resulting frequency table is regularised and
//! aggregated into the index.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::Serialize;

use psi_stats::rounding::MAX_PRECISION;

use crate::binning::{BinEdges, BinningMode, Bins};
use crate::categorizers::categorical_categorizer::CategoricalCategorizer;
use crate::categorizers::numeric_categorizer::NumericCategorizer;
use crate::category::Category;
use crate::config::PsiConfig;
use crate::errors::PsiError;
use crate::frequency::FrequencyTable;
use crate::sample::{normalize, resolve_data_kind, DataKind, Sample, SampleInput};
use crate::severity::{DriftSeverity, SeverityThresholds};

/// Default frequency substituted for empty categories.
pub const DEFAULT_REGULARISER: f64 = 0.0001;
/// Default number of decimals in interval labels.
pub const DEFAULT_PRECISION: usize = 3;
/// Default number of bins.
pub const DEFAULT_BINS: usize = 10;

/// Maps every element of a sample onto a category.
///
/// One categorizer is built per computation, from the expected sample only,
/// and then applied to both samples.
pub trait Categorizer: Send + Sync {
    /// Categories of every element, in sample order.
    fn categorize(&self, sample: &Sample) -> Vec<Category>;

    /// The treatment this categorizer applies.
    fn data_kind(&self) -> DataKind;

    /// Bin edges, for categorizers that bin.
    fn edges(&self) -> Option<&BinEdges> {
        None
    }
}

/// Parameters of a PSI computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PsiOptions {
    /// Binning strategy for numeric data; `None` requires explicit breaks.
    pub binning_mode: Option<BinningMode>,
    /// Number of bins or explicit breaks; `None` only makes sense for
    /// categorical data.
    pub bins: Option<Bins>,
    /// Treat numeric data as categorical.
    pub force_categorical: bool,
    /// Frequency substituted for empty categories in the sum.
    pub regulariser: f64,
    /// Decimals used to label (and merge) bin edges.
    pub precision: usize,
}

impl Default for PsiOptions {
    fn default() -> Self {
        Self {
            binning_mode: Some(BinningMode::Equidistant),
            bins: Some(Bins::Count(DEFAULT_BINS)),
            force_categorical: false,
            regulariser: DEFAULT_REGULARISER,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl PsiOptions {
    pub fn with_mode(mut self, mode: Option<BinningMode>) -> Self {
        self.binning_mode = mode;
        self
    }

    pub fn with_bins(mut self, bins: impl Into<Bins>) -> Self {
        self.bins = Some(bins.into());
        self
    }

    pub fn without_bins(mut self) -> Self {
        self.bins = None;
        self
    }

    pub fn categorical(mut self) -> Self {
        self.force_categorical = true;
        self
    }

    pub fn with_regulariser(mut self, regulariser: f64) -> Self {
        self.regulariser = regulariser;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Checks the parameters that do not depend on the data.
    pub fn validate(&self) -> Result<(), PsiError> {
        if !self.regulariser.is_finite() || self.regulariser <= 0.0 {
            return Err(PsiError::config(format!(
                "regulariser must be a finite positive number, got {}",
                self.regulariser
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(PsiError::config(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }
}

/// Everything a PSI computation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsiReport {
    /// The index; NaN when either sample is empty.
    pub psi: f64,
    /// Unregularised frequencies: empty categories show `0.0`.
    pub table: FrequencyTable,
    /// How the samples were treated; `None` when the computation short-circuited.
    pub data_kind: Option<DataKind>,
    /// Edges derived from the expected sample, for binned data.
    pub edges: Option<BinEdges>,
    /// Conventional interpretation of the index.
    pub severity: DriftSeverity,
}

impl PsiReport {
    fn undefined() -> Self {
        Self {
            psi: f64::NAN,
            table: FrequencyTable::empty(),
            data_kind: None,
            edges: None,
            severity: DriftSeverity::Undefined,
        }
    }

    /// True when the index could not be computed (an empty sample).
    pub fn is_undefined(&self) -> bool {
        self.psi.is_nan()
    }

    /// Splits the report into the `(psi, table)` pair.
    pub fn into_parts(self) -> (f64, FrequencyTable) {
        (self.psi, self.table)
    }
}

/// Computes PSI values with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct PsiEngine {
    options: PsiOptions,
    thresholds: SeverityThresholds,
}

impl PsiEngine {
    pub fn new(options: PsiOptions) -> Self {
        Self {
            options,
            thresholds: SeverityThresholds::default(),
        }
    }

    /// Builds an engine from a (merged) configuration.
    pub fn from_config(config: &PsiConfig) -> Result<Self, PsiError> {
        let options = config.to_options()?;
        options.validate()?;
        info!(
            "PSI engine configured: mode={:?}, bins={:?}, force_categorical={}, regulariser={}, precision={}",
            options.binning_mode, options.bins, options.force_categorical, options.regulariser, options.precision
        );
        Ok(Self {
            options,
            thresholds: config.severity_thresholds(),
        })
    }

    pub fn with_thresholds(mut self, thresholds: SeverityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn options(&self) -> &PsiOptions {
        &self.options
    }

    pub fn thresholds(&self) -> &SeverityThresholds {
        &self.thresholds
    }

    /// Compares an actual sample against an expected one.
    pub fn evaluate(
        &self,
        expected: impl Into<SampleInput>,
        actual: impl Into<SampleInput>,
    ) -> Result<PsiReport, PsiError> {
        self.options.validate()?;

        let expected = normalize(expected.into())?;
        let actual = normalize(actual.into())?;
        if expected.is_empty() || actual.is_empty() {
            debug!(
                "Empty sample (expected: {}, actual: {}); PSI is undefined.",
                expected.len(),
                actual.len()
            );
            return Ok(PsiReport::undefined());
        }

        let data_kind = resolve_data_kind(&expected, &actual, self.options.force_categorical)?;
        debug!(
            "Comparing {} expected against {} actual values as {} data.",
            expected.len(),
            actual.len(),
            data_kind
        );

        let categorizer: Box<dyn Categorizer> = match data_kind {
            DataKind::Numeric => Box::new(NumericCategorizer::fit(&expected, &self.options)?),
            DataKind::Categorical => Box::new(CategoricalCategorizer::new()),
        };

        let table = FrequencyTable::from_categories(
            &categorizer.categorize(&expected),
            &categorizer.categorize(&actual),
        );
        let psi = table.psi(self.options.regulariser);
        debug!("PSI = {} over {} categories.", psi, table.len());

        Ok(PsiReport {
            psi,
            severity: DriftSeverity::from_psi(psi, &self.thresholds),
            data_kind: Some(categorizer.data_kind()),
            edges: categorizer.edges().cloned(),
            table,
        })
    }
}
