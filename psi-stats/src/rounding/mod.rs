// psi-stats/src/rounding/mod.rs
use libm::{pow, round};

/// Largest number of decimal digits used for edge labels and edge merging.
pub const MAX_PRECISION: usize = 12;

/// Rounds `value` to `precision` decimal digits (half away from zero).
///
/// Non-finite values are returned unchanged, as are values so large that
/// scaling them would overflow.
pub fn round_to(value: f64, precision: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = pow(10.0, precision.min(MAX_PRECISION) as f64);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    round(scaled) / factor
}

/// True when two values are indistinguishable at `precision` decimal digits.
pub fn same_at_precision(a: f64, b: f64, precision: usize) -> bool {
    round_to(a, precision) == round_to(b, precision)
}
