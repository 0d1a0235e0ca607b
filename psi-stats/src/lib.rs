// psi-stats/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod rounding;
pub mod statistics;
pub mod quantile;
pub mod edges;
pub mod divergence;

/// Relative frequency of a category within one sample, in `[0, 1]`.
pub type Frequency = f64;
