// psi-core/src/categorizers/numeric_categorizer.rs
//! A `Categorizer` that bins numbers into intervals derived from the expected
//! sample. Missing values keep their own category and are never binned;
//! numbers outside the edges map onto the out-of-range category.
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::binning::{derive_edges, BinEdges};
use crate::category::Category;
use crate::engine::{Categorizer, PsiOptions};
use crate::errors::PsiError;
use crate::sample::{DataKind, Sample, Value};

#[derive(Debug, Clone)]
pub struct NumericCategorizer {
    edges: Option<BinEdges>,
}

impl NumericCategorizer {
    /// Derives the bin edges from the expected sample.
    pub fn fit(expected: &Sample, options: &PsiOptions) -> Result<Self, PsiError> {
        let edges = derive_edges(
            options.binning_mode,
            options.bins.as_ref(),
            &expected.numbers(),
            options.precision,
        )?;

        match &edges {
            Some(edges) => debug!(
                "Fitted {} bin(s) on the expected sample: {:?}",
                edges.bin_count(),
                edges.edges()
            ),
            None => debug!("Expected sample holds no number; no bins were fitted."),
        }
        Ok(Self { edges })
    }

    /// Wraps edges that were derived elsewhere.
    pub fn with_edges(edges: BinEdges) -> Self {
        Self { edges: Some(edges) }
    }
}

impl Categorizer for NumericCategorizer {
    fn categorize(&self, sample: &Sample) -> Vec<Category> {
        sample
            .values()
            .iter()
            .map(|value| match value {
                Value::Missing => Category::Missing,
                Value::Number(n) => self
                    .edges
                    .as_ref()
                    .map_or(Category::OutOfRange, |edges| edges.categorize(*n)),
                // Typing is checked before categorizing; keep the mapping total.
                Value::Label(s) => Category::Label(s.clone()),
            })
            .collect()
    }

    fn data_kind(&self) -> DataKind {
        DataKind::Numeric
    }

    fn edges(&self) -> Option<&BinEdges> {
        self.edges.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{BinningMode, Bins};

    fn sample(values: &[f64]) -> Sample {
        Sample::new(values.iter().copied().map(Value::number).collect())
    }

    #[test]
    fn test_edges_come_from_expected_only() {
        let options = PsiOptions::default().with_bins(Bins::Count(3));
        let expected = sample(&[1.0, 7.0, 4.0]);
        let categorizer = NumericCategorizer::fit(&expected, &options).unwrap();
        assert_eq!(categorizer.edges().unwrap().edges(), &[1.0, 3.0, 5.0, 7.0]);

        let actual = sample(&[0.0, 2.0, 7.0, 9.0, f64::NAN]);
        let categories = categorizer.categorize(&actual);
        assert_eq!(categories[0], Category::OutOfRange);
        assert!(matches!(categories[1], Category::Interval { index: 0, .. }));
        assert!(matches!(categories[2], Category::Interval { index: 2, .. }));
        assert_eq!(categories[3], Category::OutOfRange);
        assert_eq!(categories[4], Category::Missing);
    }

    #[test]
    fn test_missing_only_expected_sample() {
        let options = PsiOptions::default();
        let expected = sample(&[f64::NAN, f64::NAN]);
        let categorizer = NumericCategorizer::fit(&expected, &options).unwrap();
        assert!(categorizer.edges().is_none());
        assert_eq!(categorizer.categorize(&expected), vec![Category::Missing; 2]);
        assert_eq!(categorizer.categorize(&sample(&[1.0])), vec![Category::OutOfRange]);
    }

    #[test]
    fn test_quantile_fit() {
        let options = PsiOptions::default()
            .with_mode(Some(BinningMode::Quantile))
            .with_bins(Bins::Count(2));
        let expected = sample(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let categorizer = NumericCategorizer::fit(&expected, &options).unwrap();
        assert_eq!(categorizer.edges().unwrap().edges(), &[1.0, 3.0, 5.0]);
    }
}
