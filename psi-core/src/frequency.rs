// psi-core/src/frequency.rs
//! The expected/actual frequency table and the PSI aggregation over it.

use serde::Serialize;
use std::collections::BTreeMap;

use psi_stats::divergence::{population_stability_index, psi_term, regularise, relative_frequency};

use crate::category::Category;

/// Frequencies of one category in both samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub category: Category,
    pub expected: f64,
    pub actual: f64,
}

/// Category -> (expected, actual) frequencies over the union of the
/// categories seen in either sample, ordered by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Counts the categories of both samples and divides by sample size.
    ///
    /// A category never seen in one sample gets a frequency of exactly `0.0`
    /// on that side.
    pub fn from_categories(expected: &[Category], actual: &[Category]) -> Self {
        let mut counts: BTreeMap<&Category, (usize, usize)> = BTreeMap::new();
        for category in expected {
            counts.entry(category).or_default().0 += 1;
        }
        for category in actual {
            counts.entry(category).or_default().1 += 1;
        }

        let rows = counts
            .into_iter()
            .map(|(category, (e, a))| FrequencyRow {
                category: category.clone(),
                expected: relative_frequency(e, expected.len()),
                actual: relative_frequency(a, actual.len()),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.rows.iter().map(|row| &row.category)
    }

    pub fn get(&self, category: &Category) -> Option<&FrequencyRow> {
        self.rows
            .binary_search_by(|row| row.category.cmp(category))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Looks a row up by its displayed category text.
    pub fn get_by_label(&self, label: &str) -> Option<&FrequencyRow> {
        self.rows.iter().find(|row| row.category.to_string() == label)
    }

    /// Sum of the expected column.
    pub fn expected_total(&self) -> f64 {
        self.rows.iter().map(|row| row.expected).sum()
    }

    /// Sum of the actual column.
    pub fn actual_total(&self) -> f64 {
        self.rows.iter().map(|row| row.actual).sum()
    }

    /// Copy of the table where every cell equal to `0.0` holds `regulariser`.
    pub fn regularised(&self, regulariser: f64) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| FrequencyRow {
                category: row.category.clone(),
                expected: regularise(row.expected, regulariser),
                actual: regularise(row.actual, regulariser),
            })
            .collect();
        Self { rows }
    }

    /// Per-category PSI terms on the regularised frequencies, in row order.
    pub fn contributions(&self, regulariser: f64) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| {
                psi_term(
                    regularise(row.expected, regulariser),
                    regularise(row.actual, regulariser),
                )
            })
            .collect()
    }

    /// The population stability index of the table.
    pub fn psi(&self, regulariser: f64) -> f64 {
        population_stability_index(
            self.rows.iter().map(|row| (row.expected, row.actual)),
            regulariser,
        )
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyRow;
    type IntoIter = std::slice::Iter<'a, FrequencyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Category {
        Category::Label(s.to_string())
    }

    #[test]
    fn test_from_categories_union_and_zeros() {
        let expected = vec![label("a"), label("a"), label("b"), Category::Missing];
        let actual = vec![label("a"), label("c")];
        let table = FrequencyTable::from_categories(&expected, &actual);

        assert_eq!(table.len(), 4);
        let b = table.get(&label("b")).unwrap();
        assert_eq!((b.expected, b.actual), (0.25, 0.0));
        let c = table.get(&label("c")).unwrap();
        assert_eq!((c.expected, c.actual), (0.0, 0.5));
        assert_eq!(table.expected_total(), 1.0);
        assert_eq!(table.actual_total(), 1.0);
        // missing sorts last
        assert_eq!(table.rows().last().unwrap().category, Category::Missing);
    }

    #[test]
    fn test_regularised_keeps_non_zero_cells() {
        let table = FrequencyTable::from_categories(&[label("a"), label("b")], &[label("a")]);
        let regularised = table.regularised(0.01);
        let b = regularised.get(&label("b")).unwrap();
        assert_eq!((b.expected, b.actual), (0.5, 0.01));
        let a = regularised.get(&label("a")).unwrap();
        assert_eq!((a.expected, a.actual), (0.5, 1.0));
    }

    #[test]
    fn test_psi_is_sum_of_contributions() {
        let table = FrequencyTable::from_categories(
            &[label("a"), label("a"), label("b")],
            &[label("a"), label("b"), label("b"), label("c")],
        );
        let total: f64 = table.contributions(1e-4).iter().sum();
        assert!((table.psi(1e-4) - total).abs() < 1e-12);
        assert!(table.contributions(1e-4).iter().all(|&c| c >= 0.0));
    }

    #[test]
    fn test_identical_categories_give_zero() {
        let sample = vec![label("x"), label("y"), label("y")];
        let table = FrequencyTable::from_categories(&sample, &sample);
        assert_eq!(table.psi(1e-4), 0.0);
    }

    #[test]
    fn test_label_named_missing_is_its_own_row() {
        let expected = vec![label("missing"), Category::Missing];
        let actual = vec![label("missing"), label("missing")];
        let table = FrequencyTable::from_categories(&expected, &actual);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_by_label("missing").unwrap().actual, 1.0);
        assert_eq!(table.get_by_label("<missing>").unwrap().actual, 0.0);
    }

    #[test]
    fn test_serializes_as_rows() {
        let table = FrequencyTable::from_categories(&[label("a")], &[Category::Missing]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["category"], "a");
        assert_eq!(json[1]["category"], "<missing>");
        assert_eq!(json[1]["actual"], 1.0);
    }
}
