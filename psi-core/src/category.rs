// psi-core/src/category.rs
//! Categories: the atomic unit that frequencies are counted over.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::sample::Value;

/// A non-NaN float usable as a map key.
///
/// `-0.0` and `0.0` are the same key. Ordering follows `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    /// Returns `None` for NaN, which has no place in a category set.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value == 0.0 {
            Some(FloatKey(0.0))
        } else {
            Some(FloatKey(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category of the frequency table.
///
/// The derived ordering puts intervals first (by position), then raw numbers
/// ascending, then labels, then the out-of-range category and finally the
/// missing category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// A bin derived from the expected sample.
    Interval { index: usize, label: String },
    /// A raw numeric value, in categorical mode.
    Number(FloatKey),
    /// A raw label, in categorical mode.
    Label(String),
    /// A value of the actual sample lying outside the expected sample's edges.
    OutOfRange,
    /// Every missing value.
    Missing,
}

impl Category {
    /// Identity mapping used in categorical mode.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Missing => Category::Missing,
            Value::Number(n) => FloatKey::new(*n).map_or(Category::Missing, Category::Number),
            Value::Label(s) => Category::Label(s.clone()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Category::Missing)
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Category::OutOfRange)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Interval { label, .. } => write!(f, "{}", label),
            Category::Number(n) => write!(f, "{}", n),
            Category::Label(s) => write!(f, "{}", s),
            Category::OutOfRange => write!(f, "<out of range>"),
            Category::Missing => write!(f, "<missing>"),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
