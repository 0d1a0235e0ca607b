// psi-core/src/oneshot.rs
//! One-shot PSI computation.
//!
//! Wraps a throwaway [`PsiEngine`] for callers that only need the index and
//! the frequency table.

use crate::engine::{PsiEngine, PsiOptions};
use crate::errors::PsiError;
use crate::frequency::FrequencyTable;
use crate::sample::SampleInput;

/// Computes the population stability index of `actual` against `expected`.
///
/// Returns the index together with the unregularised frequency table. When
/// either sample is empty the index is NaN and the table is empty.
///
/// # Errors
///
/// * [`PsiError::InvalidInputShape`] for a table input with more than one column.
/// * [`PsiError::TypeMismatch`] when the two samples cannot be compared.
/// * [`PsiError::ConfigurationError`] for unusable binning parameters.
pub fn compute_psi(
    expected: impl Into<SampleInput>,
    actual: impl Into<SampleInput>,
    options: &PsiOptions,
) -> Result<(f64, FrequencyTable), PsiError> {
    let report = PsiEngine::new(options.clone()).evaluate(expected, actual)?;
    Ok(report.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{BinningMode, Bins};

    #[test]
    fn test_compute_psi_matches_engine() {
        let options = PsiOptions::default().with_bins(Bins::Count(3));
        let expected = vec![1.0, 2.0, 2.0, 3.0, 5.0, 7.0];
        let actual = vec![1.0, 1.0, 2.0, 6.0, 7.0, 7.0];

        let (psi, table) = compute_psi(expected.clone(), actual.clone(), &options).unwrap();
        let report = PsiEngine::new(options).evaluate(expected, actual).unwrap();
        assert_eq!(psi, report.psi);
        assert_eq!(table, report.table);
    }

    #[test]
    fn test_compute_psi_propagates_errors() {
        let options = PsiOptions::default().with_mode(Some(BinningMode::Quantile)).with_bins(Bins::Count(0));
        assert!(matches!(
            compute_psi(vec![1.0, 2.0], vec![1.0], &options),
            Err(PsiError::ConfigurationError(_))
        ));
    }
}
