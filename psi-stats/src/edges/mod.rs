// psi-stats/src/edges/mod.rs
//! Bin edge construction and lookup.
//!
//! Edges are an ascending list `e0 < e1 < ... < en` describing `n` intervals.
//! The first interval is closed on both ends (`[e0, e1]`), every later one is
//! open on the left and closed on the right (`(e(i-1), e(i)]`).

extern crate alloc;
use alloc::vec::Vec;
use libm::fabs;

use crate::quantile::quantile_sorted;
use crate::rounding::same_at_precision;

/// Relative widening applied to a single-valued range before splitting it.
pub const DEGENERATE_RANGE_ADJUSTMENT: f64 = 0.001;

/// Result of collapsing edges that are indistinguishable at a precision.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEdges {
    /// The surviving, strictly increasing edges.
    pub edges: Vec<f64>,
    /// How many edges were dropped.
    pub dropped: usize,
}

/// Splits `[min, max]` into `count` equal-width intervals.
///
/// A single-valued range is first widened by 0.1% of `|min|` on each side
/// (or by 0.001 when the value is zero) so that a valid interval exists.
/// The last edge is exactly `max` (or its widened counterpart).
pub fn equal_width_edges(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }

    let (low, high) = if min == max {
        let adjustment = if min == 0.0 {
            DEGENERATE_RANGE_ADJUSTMENT
        } else {
            fabs(min) * DEGENERATE_RANGE_ADJUSTMENT
        };
        (min - adjustment, max + adjustment)
    } else {
        (min, max)
    };

    let width = (high - low) / count as f64;
    let mut edges: Vec<f64> = if width.is_finite() {
        (0..count).map(|i| low + width * i as f64).collect()
    } else {
        // The span exceeds f64::MAX; interpolate so no term overflows.
        (0..count)
            .map(|i| {
                let t = i as f64 / count as f64;
                low * (1.0 - t) + high * t
            })
            .collect()
    };
    edges.push(high);
    edges
}

/// Edges at the empirical quantiles `0, 1/count, ..., 1` of an ascending slice.
///
/// Repeated values yield repeated edges; run the result through
/// [`merge_collapsed`] before using it.
pub fn quantile_edges(sorted: &[f64], count: usize) -> Vec<f64> {
    if count == 0 || sorted.is_empty() {
        return Vec::new();
    }
    (0..=count)
        .map(|i| quantile_sorted(sorted, i as f64 / count as f64))
        .collect()
}

/// Collapses adjacent edges that round to the same value at `precision`.
///
/// The lowest edge always survives. When the top edge collapses into the
/// previous survivor it replaces it, so the merged edges still cover the
/// full original range. If every edge collapses, the raw lowest and highest
/// edges are kept as one interval (possibly `[v, v]` for constant data).
pub fn merge_collapsed(edges: &[f64], precision: usize) -> MergedEdges {
    let mut kept: Vec<f64> = Vec::with_capacity(edges.len());
    let last_index = edges.len().saturating_sub(1);

    for (i, &edge) in edges.iter().enumerate() {
        let collapses = kept
            .last()
            .is_some_and(|&previous| same_at_precision(previous, edge, precision));

        if !collapses {
            kept.push(edge);
        } else if i == last_index {
            if kept.len() == 1 {
                kept.push(edge);
            } else if let Some(previous) = kept.last_mut() {
                *previous = edge;
            }
        }
    }

    MergedEdges {
        dropped: edges.len() - kept.len(),
        edges: kept,
    }
}

/// True when the slice holds at least two edges, none NaN, in strictly
/// ascending order. Used to validate caller-supplied break points.
pub fn is_strictly_increasing(edges: &[f64]) -> bool {
    edges.len() >= 2
        && edges.iter().all(|e| !e.is_nan())
        && edges.windows(2).all(|pair| pair[0] < pair[1])
}

/// Index of the interval containing `value`, or `None` when it falls outside
/// `[e0, en]` (or is NaN).
pub fn locate(edges: &[f64], value: f64) -> Option<usize> {
    let (first, last) = match (edges.first(), edges.last()) {
        (Some(first), Some(last)) if edges.len() >= 2 => (*first, *last),
        _ => return None,
    };
    if value.is_nan() || value < first || value > last {
        return None;
    }
    // First edge that is >= value; the value then sits in (e(idx-1), e(idx)].
    let idx = edges.partition_point(|&edge| edge < value);
    Some(idx.saturating_sub(1))
}
