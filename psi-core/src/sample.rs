// psi-core/src/sample.rs
//! Sample model and input normalization.
//!
//! Callers hand samples over either as a flat sequence or as a table with a
//! single column. Both shapes are normalized into a [`Sample`], an ordered
//! sequence of [`Value`]s where missing entries are explicit.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PsiError;

/// A single observation of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A missing observation. Every missing marker belongs to one category.
    Missing,
    /// A numeric observation. Never NaN; NaN is stored as `Missing`.
    Number(f64),
    /// A categorical label.
    Label(String),
}

impl Value {
    /// Builds a numeric value, mapping NaN onto `Missing`.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Value::Missing
        } else {
            Value::Number(value)
        }
    }

    /// Builds a categorical label.
    pub fn label(value: impl Into<String>) -> Self {
        Value::Label(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns the number, if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Restores the NaN-for-missing invariant on values built by hand or
    /// deserialized from an untrusted source.
    fn normalized(self) -> Self {
        match self {
            Value::Number(n) => Value::number(n),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "missing"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Value::Missing, Value::number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Label(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Label(value)
    }
}

/// A table-like input: named columns and rows of cells.
///
/// Only a table with exactly one column can be used as a sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Builds a single-column table.
    pub fn single_column(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            columns: vec![name.into()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Projects the table onto one named column.
    pub fn select(&self, name: &str) -> Result<Table, PsiError> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PsiError::shape(format!("column '{}' not found in table", name)))?;

        let mut values = Vec::with_capacity(self.rows.len());
        for (row_number, row) in self.rows.iter().enumerate() {
            let cell = row.get(index).cloned().ok_or_else(|| {
                PsiError::shape(format!(
                    "row {} has {} cells, expected {}",
                    row_number,
                    row.len(),
                    self.columns.len()
                ))
            })?;
            values.push(cell);
        }
        Ok(Table::single_column(name, values))
    }

    /// Squeezes a single-column table into its values.
    pub fn squeeze(self) -> Result<Vec<Value>, PsiError> {
        if self.columns.len() != 1 {
            return Err(PsiError::shape(format!(
                "expected a single-column table, found {} columns",
                self.columns.len()
            )));
        }

        self.rows
            .into_iter()
            .enumerate()
            .map(|(row_number, row)| {
                let width = row.len();
                let mut cells = row.into_iter();
                match (cells.next(), width) {
                    (Some(cell), 1) => Ok(cell),
                    _ => Err(PsiError::shape(format!(
                        "row {} has {} cells, expected 1",
                        row_number, width
                    ))),
                }
            })
            .collect()
    }
}

/// The container forms accepted for a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleInput {
    /// A flat, ordered sequence of values.
    Sequence(Vec<Value>),
    /// A table; must have exactly one column.
    Table(Table),
}

impl From<Vec<Value>> for SampleInput {
    fn from(values: Vec<Value>) -> Self {
        SampleInput::Sequence(values)
    }
}

impl From<Vec<f64>> for SampleInput {
    fn from(values: Vec<f64>) -> Self {
        SampleInput::Sequence(values.into_iter().map(Value::number).collect())
    }
}

impl From<&[f64]> for SampleInput {
    fn from(values: &[f64]) -> Self {
        SampleInput::Sequence(values.iter().copied().map(Value::number).collect())
    }
}

impl From<Vec<Option<f64>>> for SampleInput {
    fn from(values: Vec<Option<f64>>) -> Self {
        SampleInput::Sequence(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<i64>> for SampleInput {
    fn from(values: Vec<i64>) -> Self {
        SampleInput::Sequence(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<&str>> for SampleInput {
    fn from(values: Vec<&str>) -> Self {
        SampleInput::Sequence(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for SampleInput {
    fn from(values: Vec<String>) -> Self {
        SampleInput::Sequence(values.into_iter().map(Value::from).collect())
    }
}

impl From<Table> for SampleInput {
    fn from(table: Table) -> Self {
        SampleInput::Table(table)
    }
}

impl From<Sample> for SampleInput {
    fn from(sample: Sample) -> Self {
        SampleInput::Sequence(sample.values)
    }
}

/// How the elements of one sample are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleTyping {
    /// Every non-missing element is a number (also: nothing but missing values).
    Numeric,
    /// Every non-missing element is a label.
    Categorical,
    /// Numbers and labels are mixed.
    Mixed,
}

/// How a pair of samples is categorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Values are binned into intervals derived from the expected sample.
    Numeric,
    /// Every raw value is its own category.
    Categorical,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Numeric => write!(f, "numeric"),
            DataKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// A normalized sample: an ordered sequence with explicit missing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<Value>,
}

impl Sample {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter().map(Value::normalized).collect(),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numbers of the sample, in order, skipping missing values and labels.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }

    /// Checks every element and reports how the sample is typed.
    pub fn typing(&self) -> SampleTyping {
        let has_numbers = self.values.iter().any(|v| matches!(v, Value::Number(_)));
        let has_labels = self.values.iter().any(|v| matches!(v, Value::Label(_)));
        match (has_numbers, has_labels) {
            (true, true) => SampleTyping::Mixed,
            (false, true) => SampleTyping::Categorical,
            _ => SampleTyping::Numeric,
        }
    }
}

/// Normalizes any accepted container form into a [`Sample`].
pub fn normalize(input: SampleInput) -> Result<Sample, PsiError> {
    let values = match input {
        SampleInput::Sequence(values) => values,
        SampleInput::Table(table) => {
            debug!("Squeezing table with columns {:?} into a sample.", table.columns());
            table.squeeze()?
        }
    };
    Ok(Sample::new(values))
}

/// Decides how a pair of non-empty samples is categorized.
///
/// `force_categorical` always wins. Otherwise the expected sample decides; a
/// numeric expected sample requires a numeric actual sample. A sample that
/// mixes numbers and labels is rejected.
pub fn resolve_data_kind(
    expected: &Sample,
    actual: &Sample,
    force_categorical: bool,
) -> Result<DataKind, PsiError> {
    if force_categorical {
        return Ok(DataKind::Categorical);
    }

    if actual.typing() == SampleTyping::Mixed {
        return Err(PsiError::mismatch(
            "actual sample mixes numbers and labels; use force_categorical to treat it as categorical",
        ));
    }

    match expected.typing() {
        SampleTyping::Mixed => Err(PsiError::mismatch(
            "expected sample mixes numbers and labels; use force_categorical to treat it as categorical",
        )),
        SampleTyping::Categorical => Ok(DataKind::Categorical),
        SampleTyping::Numeric => match actual.typing() {
            SampleTyping::Numeric => Ok(DataKind::Numeric),
            _ => Err(PsiError::mismatch(
                "expected sample is numeric but actual sample is not",
            )),
        },
    }
}
