// psi-stats/src/quantile/mod.rs
use libm::floor;

/// Empirical quantile of an ascending, NaN-free slice.
///
/// Uses linear interpolation between the closest ranks, so `q = 0` yields the
/// minimum and `q = 1` the maximum. Returns NaN for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let last = sorted.len() - 1;
    if q <= 0.0 {
        return sorted[0];
    }
    if q >= 1.0 {
        return sorted[last];
    }

    let rank = q * last as f64;
    let lower = floor(rank) as usize;
    let upper = (lower + 1).min(last);
    let fraction = rank - lower as f64;

    if fraction == 0.0 || lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_quantile_empty() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn test_quantile_bounds() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_eq!(quantile_sorted(&data, 1.0), 5.0);
        assert_eq!(quantile_sorted(&data, 0.5), 3.0);
    }

    #[test]
    fn test_quantile_interpolates() {
        // rank = 1/3 * 3 = 1.0 -> exact; rank = 0.5 * 3 = 1.5 -> midway
        let data = [10.0, 20.0, 30.0, 40.0];
        assert!((quantile_sorted(&data, 0.5) - 25.0).abs() < EPSILON);
        assert!((quantile_sorted(&data, 0.25) - 17.5).abs() < EPSILON);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
    }
}
