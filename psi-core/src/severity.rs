// psi-core/src/severity.rs
//! Conventional interpretation bands for PSI values.
//!
//! The bands are a monitoring convention, not a statistical test: below the
//! moderate threshold a feature is considered stable, above the significant
//! threshold it has drifted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PSI below this value is read as stable.
pub const DEFAULT_MODERATE_THRESHOLD: f64 = 0.1;
/// PSI at or above this value is read as a significant shift.
pub const DEFAULT_SIGNIFICANT_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SeverityThresholds {
    pub moderate: f64,
    pub significant: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            moderate: DEFAULT_MODERATE_THRESHOLD,
            significant: DEFAULT_SIGNIFICANT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftSeverity {
    Stable,
    Moderate,
    Significant,
    /// The index is NaN (an empty sample).
    Undefined,
}

impl DriftSeverity {
    pub fn from_psi(psi: f64, thresholds: &SeverityThresholds) -> Self {
        if psi.is_nan() {
            DriftSeverity::Undefined
        } else if psi < thresholds.moderate {
            DriftSeverity::Stable
        } else if psi < thresholds.significant {
            DriftSeverity::Moderate
        } else {
            DriftSeverity::Significant
        }
    }

    /// True for bands that indicate a shift.
    pub fn is_drift(&self) -> bool {
        matches!(self, DriftSeverity::Moderate | DriftSeverity::Significant)
    }
}

impl fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DriftSeverity::Stable => "stable",
            DriftSeverity::Moderate => "moderate shift",
            DriftSeverity::Significant => "significant shift",
            DriftSeverity::Undefined => "undefined",
        };
        write!(f, "{}", text)
    }
}
