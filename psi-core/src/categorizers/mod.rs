// psi-core/src/categorizers/mod.rs
//! This module contains the categorizer implementations.
//!
//! Each categorizer is a separate file within this directory and implements the
//! `Categorizer` trait: the numeric one bins values with edges derived from the
//! expected sample, the categorical one maps every raw value onto itself.
//!
//! # License
//! MIT OR Apache-2.0

pub mod numeric_categorizer;
pub mod categorical_categorizer;
