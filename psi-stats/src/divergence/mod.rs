// psi-stats/src/divergence/mod.rs
use libm::log;

use crate::Frequency;

/// Relative frequency of `count` hits out of `total` observations.
///
/// An empty sample has no frequencies; `0.0` is returned so that callers
/// never divide by zero.
pub fn relative_frequency(count: usize, total: usize) -> Frequency {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Substitutes `regulariser` for a frequency of exactly zero.
pub fn regularise(frequency: Frequency, regulariser: f64) -> Frequency {
    if frequency == 0.0 {
        regulariser
    } else {
        frequency
    }
}

/// Contribution of one category to the population stability index.
///
/// `(expected - actual) * ln(expected / actual)`. Both frequencies must be
/// strictly positive; the term is then never negative and is zero only when
/// both frequencies are equal.
pub fn psi_term(expected: Frequency, actual: Frequency) -> f64 {
    (expected - actual) * log(expected / actual)
}

/// Sums the PSI terms of `(expected, actual)` pairs after regularising zeros.
pub fn population_stability_index<I>(pairs: I, regulariser: f64) -> f64
where
    I: IntoIterator<Item = (Frequency, Frequency)>,
{
    pairs
        .into_iter()
        .map(|(expected, actual)| {
            psi_term(regularise(expected, regulariser), regularise(actual, regulariser))
        })
        .sum()
}
