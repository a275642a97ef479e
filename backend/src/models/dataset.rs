//! In-memory tabular dataset.
//!
//! A [`Dataset`] is a set of equally long named columns. Each column is either
//! numeric or text; there is no null, missing cells are normalized by the
//! loader before a dataset is built.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker written in place of every missing value that is not geographic.
pub const MISSING_PLACEHOLDER: &str = "NaN";

/// Northing assigned to rows without a position. Lies above the visible map frame.
pub const NORTHING_SENTINEL: f64 = 15_000_000.0;

/// Easting assigned to rows without a position.
pub const EASTING_SENTINEL: f64 = 0.0;

/// Projected geographic column names.
pub const NORTHING: &str = "northing";
pub const EASTING: &str = "easting";

/// A single cell value, serialized as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Text used for categorical axes and legends.
    pub fn label(&self) -> String {
        match self {
            Cell::Number(v) => format_number(*v),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// Column storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }

    /// Cell at `row`. Out-of-range rows read as the missing placeholder.
    pub fn cell(&self, row: usize) -> Cell {
        match &self.values {
            ColumnValues::Numeric(v) => v
                .get(row)
                .map(|x| Cell::Number(*x))
                .unwrap_or_else(|| Cell::Text(MISSING_PLACEHOLDER.to_string())),
            ColumnValues::Text(v) => Cell::Text(
                v.get(row)
                    .cloned()
                    .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string()),
            ),
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        (0..self.len()).map(|row| self.cell(row)).collect()
    }

    /// Number of distinct values, the placeholder included.
    pub fn distinct_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v
                .iter()
                .map(|x| normalize_zero(*x).to_bits())
                .collect::<HashSet<_>>()
                .len(),
            ColumnValues::Text(v) => v.iter().collect::<HashSet<_>>().len(),
        }
    }
}

/// A table of equally long named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, String> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(format!(
                "column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                row_count
            ));
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Projected coordinates for the map panel, sentinel-filled when the
    /// dataset carries no usable geographic column.
    pub fn map_coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        let northing = self
            .column(NORTHING)
            .and_then(Column::as_numeric)
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| vec![NORTHING_SENTINEL; self.row_count]);
        let easting = self
            .column(EASTING)
            .and_then(Column::as_numeric)
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| vec![EASTING_SENTINEL; self.row_count]);
        (northing, easting)
    }
}

/// Render a number the way a CSV writer would: integers without a fraction.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
