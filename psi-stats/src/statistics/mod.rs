// psi-stats/src/statistics/mod.rs
extern crate alloc;
use alloc::vec::Vec;

/// Observed support of a numeric sample, ignoring NaN entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
    /// Number of values that took part in the range.
    pub count: usize,
}

impl SampleRange {
    /// True when the sample has a single distinct value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Computes the `[min, max]` range of a slice, skipping NaN.
///
/// Returns `None` when no value is left after skipping.
pub fn compute_range(values: &[f64]) -> Option<SampleRange> {
    let mut iter = values.iter().copied().filter(|v| !v.is_nan());
    let first = iter.next()?;

    let mut range = SampleRange { min: first, max: first, count: 1 };
    for value in iter {
        if value < range.min {
            range.min = value;
        }
        if value > range.max {
            range.max = value;
        }
        range.count += 1;
    }
    Some(range)
}

/// Returns the non-NaN values of a slice in ascending order.
pub fn sorted_values(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::vec;

    #[test]
    fn test_compute_range_empty() {
        assert!(compute_range(&[]).is_none());
        assert!(compute_range(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_compute_range_skips_nan() {
        let range = compute_range(&[3.0, f64::NAN, -1.0, 7.0]).unwrap();
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 7.0);
        assert_eq!(range.count, 3);
        assert!(!range.is_degenerate());
    }

    #[test]
    fn test_compute_range_single_value() {
        let range = compute_range(&[4.0, 4.0, 4.0]).unwrap();
        assert!(range.is_degenerate());
    }

    #[test]
    fn test_sorted_values() {
        let sorted = sorted_values(&[2.0, f64::NAN, 1.0, 3.0]);
        assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
    }
}
