// psi-cli/src/input.rs
//! Loading samples from disk.
//!
//! Files ending in `.json` hold either an array of values or an object mapping
//! column names to arrays. Every other file is delimited text with one record
//! per line. Cells that read `""`, `NA`, `NaN` or `null` are missing; cells
//! that parse as numbers are numbers; everything else is a label.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;
use thiserror::Error;

use psi_core::{SampleInput, Table, Value};

/// Tokens read as a missing value (compared case-insensitively).
pub const MISSING_TOKENS: [&str; 4] = ["", "na", "nan", "null"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("JSON sample must be an array or an object of arrays, found {0}")]
    UnsupportedJson(&'static str),
    #[error("unsupported JSON value in sample: {0}")]
    UnsupportedValue(String),
    #[error("column '{column}' holds {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        found: usize,
        expected: usize,
    },
}

/// How text sample files are read.
#[derive(Debug, Clone)]
pub struct InputOptions {
    pub delimiter: char,
    pub header: bool,
    /// Column to project onto, for multi-column files.
    pub column: Option<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: false,
            column: None,
        }
    }
}

/// Reads a sample file.
pub fn load_sample(path: &Path, options: &InputOptions) -> Result<SampleInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let input = if is_json {
        parse_json_sample(&text)
            .with_context(|| format!("Failed to parse JSON sample {}", path.display()))?
    } else {
        SampleInput::Table(parse_delimited(&text, options))
    };
    debug!("Loaded sample from {}.", path.display());

    select_column(input, options.column.as_deref())
}

/// Parses a JSON document into a sample.
pub fn parse_json_sample(text: &str) -> Result<SampleInput> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    match document {
        serde_json::Value::Array(items) => {
            let values = items.iter().map(json_value).collect::<Result<Vec<_>, _>>()?;
            Ok(SampleInput::Sequence(values))
        }
        serde_json::Value::Object(map) => {
            let columns: Vec<String> = map.keys().cloned().collect();
            let mut cells: Vec<Vec<Value>> = Vec::with_capacity(map.len());
            for (name, column) in &map {
                let serde_json::Value::Array(items) = column else {
                    return Err(InputError::UnsupportedJson(json_kind(column)).into());
                };
                let values = items.iter().map(json_value).collect::<Result<Vec<_>, _>>()?;
                if let Some(first) = cells.first()
                    && first.len() != values.len()
                {
                    return Err(InputError::ColumnLength {
                        column: name.clone(),
                        found: values.len(),
                        expected: first.len(),
                    }
                    .into());
                }
                cells.push(values);
            }
            Ok(SampleInput::Table(Table::new(columns, transpose(cells))))
        }
        other => Err(InputError::UnsupportedJson(json_kind(&other)).into()),
    }
}

/// Parses delimited text into a table. Blank lines are skipped.
pub fn parse_delimited(text: &str, options: &InputOptions) -> Table {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header: Option<Vec<String>> = if options.header {
        lines
            .next()
            .map(|line| line.split(options.delimiter).map(|c| c.trim().to_string()).collect())
    } else {
        None
    };

    let rows: Vec<Vec<Value>> = lines
        .map(|line| line.split(options.delimiter).map(parse_token).collect())
        .collect();

    let columns = header.unwrap_or_else(|| {
        let width = rows.first().map_or(1, Vec::len);
        (1..=width).map(|i| format!("column_{}", i)).collect()
    });
    Table::new(columns, rows)
}

/// Reads one cell.
pub fn parse_token(token: &str) -> Value {
    let token = token.trim();
    if MISSING_TOKENS.iter().any(|m| token.eq_ignore_ascii_case(m)) {
        return Value::Missing;
    }
    match token.parse::<f64>() {
        Ok(number) => Value::number(number),
        Err(_) => Value::label(token),
    }
}

fn select_column(input: SampleInput, column: Option<&str>) -> Result<SampleInput> {
    match (input, column) {
        (SampleInput::Table(table), Some(name)) => Ok(SampleInput::Table(table.select(name)?)),
        (SampleInput::Sequence(_), Some(name)) => {
            anyhow::bail!("--column '{}' given, but the sample is a flat array", name)
        }
        (input, None) => Ok(input),
    }
}

fn json_value(item: &serde_json::Value) -> Result<Value, InputError> {
    match item {
        serde_json::Value::Null => Ok(Value::Missing),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::number)
            .ok_or_else(|| InputError::UnsupportedValue(n.to_string())),
        serde_json::Value::String(s) => Ok(parse_string_cell(s)),
        other => Err(InputError::UnsupportedValue(other.to_string())),
    }
}

/// JSON strings stay labels unless they spell a missing value.
fn parse_string_cell(s: &str) -> Value {
    if MISSING_TOKENS.iter().any(|m| s.trim().eq_ignore_ascii_case(m)) {
        Value::Missing
    } else {
        Value::label(s)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn transpose(columns: Vec<Vec<Value>>) -> Vec<Vec<Value>> {
    let height = columns.first().map_or(0, Vec::len);
    let mut rows: Vec<Vec<Value>> = (0..height).map(|_| Vec::with_capacity(columns.len())).collect();
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    rows
}
