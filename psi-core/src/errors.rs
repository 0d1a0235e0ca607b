//! errors.rs - Custom error types for the psi-core library.
//!
//! Every failure of a PSI computation is immediate and caller-visible. An empty
//! sample is not an error; it yields an undefined (NaN) index instead.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All the ways a PSI computation can be rejected.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PsiError {
    /// The sample is neither a flat sequence nor a single-column table.
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),

    /// The samples disagree on numeric vs categorical treatment, or a sample
    /// mixes numbers and labels.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Binning or regularisation parameters are missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PsiError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        PsiError::InvalidInputShape(msg.into())
    }

    pub(crate) fn mismatch(msg: impl Into<String>) -> Self {
        PsiError::TypeMismatch(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        PsiError::ConfigurationError(msg.into())
    }
}
