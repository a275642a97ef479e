use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::path::Path;

use super::error::LoadError;
use super::projection::to_web_mercator;
use crate::models::dataset::{
    Column, Dataset, EASTING, EASTING_SENTINEL, MISSING_PLACEHOLDER, NORTHING, NORTHING_SENTINEL,
};

/// Field contents read as missing values.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Grouping columns always loaded as text, whatever their content.
pub const TEXT_COLUMNS: [&str; 2] = ["grp", "assign"];

/// Unprojected coordinate columns of uploaded datasets.
pub const LATITUDE: &str = "lat";
pub const LONGITUDE: &str = "lon";

/// A parsed CSV before type inference and missing-value handling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Fields of one column, `None` where the value is missing.
    pub fn fields(&self, index: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).filter(|v| !is_missing(v)))
            .collect()
    }
}

pub fn is_missing(value: &str) -> bool {
    NA_VALUES.contains(&value)
}

/// Parse a field as a finite number.
pub fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse CSV bytes with a header row.
///
/// Duplicate header names are made unique by suffixing `.1`, `.2`, ...
pub fn read_table(bytes: &[u8]) -> Result<RawTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let header_record = reader.headers()?.clone();
    if header_record.is_empty() || header_record.iter().all(str::is_empty) {
        return Err(LoadError::parse("No columns to parse from file"));
    }
    let headers = dedupe_headers(header_record.iter());

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| LoadError::parse(format!("row {}: {}", index + 1, e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Parse CSV bytes into a normalized dataset.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LoadError> {
    normalize(read_table(bytes)?)
}

/// Read and normalize a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| {
        let path = path.display().to_string();
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io {
                path,
                message: e.to_string(),
            }
        }
    })?;
    parse_dataset(&bytes)
}

/// Type the raw columns and replace missing values.
///
/// - `northing`/`easting` are numeric, missing entries become the sentinels.
/// - `grp`/`assign` are text.
/// - Any other column is numeric only if every field is a number; otherwise
///   it is text with missing entries replaced by [`MISSING_PLACEHOLDER`].
/// - Without projected columns, `lat`/`lon` are projected to Web Mercator.
pub fn normalize(table: RawTable) -> Result<Dataset, LoadError> {
    let derive_projection = !table.has_column(NORTHING)
        && !table.has_column(EASTING)
        && table.has_column(LATITUDE)
        && table.has_column(LONGITUDE);

    let mut columns = Vec::with_capacity(table.headers.len() + 2);
    for (index, name) in table.headers.iter().enumerate() {
        let fields = table.fields(index);
        let column = match name.as_str() {
            NORTHING => geographic_column(name, &fields, NORTHING_SENTINEL),
            EASTING => geographic_column(name, &fields, EASTING_SENTINEL),
            n if TEXT_COLUMNS.contains(&n) => text_column(name, &fields),
            _ => infer_column(name, &fields),
        };
        columns.push(column);
    }

    if derive_projection {
        let (northing, easting) = project_lat_lon(&table);
        columns.push(Column::numeric(NORTHING, northing));
        columns.push(Column::numeric(EASTING, easting));
    }

    Dataset::new(columns).map_err(LoadError::Parse)
}

fn geographic_column(name: &str, fields: &[Option<&str>], sentinel: f64) -> Column {
    let values = fields
        .iter()
        .map(|f| f.and_then(parse_number).unwrap_or(sentinel))
        .collect();
    Column::numeric(name, values)
}

fn text_column(name: &str, fields: &[Option<&str>]) -> Column {
    let values = fields
        .iter()
        .map(|f| f.unwrap_or(MISSING_PLACEHOLDER).to_string())
        .collect();
    Column::text(name, values)
}

fn infer_column(name: &str, fields: &[Option<&str>]) -> Column {
    if fields.is_empty() {
        return Column::text(name, Vec::new());
    }
    let numbers: Option<Vec<f64>> = fields.iter().map(|f| f.and_then(parse_number)).collect();
    match numbers {
        Some(values) => Column::numeric(name, values),
        None => text_column(name, fields),
    }
}

fn project_lat_lon(table: &RawTable) -> (Vec<f64>, Vec<f64>) {
    let lat = table
        .column_index(LATITUDE)
        .map(|i| table.fields(i))
        .unwrap_or_default();
    let lon = table
        .column_index(LONGITUDE)
        .map(|i| table.fields(i))
        .unwrap_or_default();

    lat.iter()
        .zip(lon.iter())
        .map(|(la, lo)| {
            let projected = match (la.and_then(parse_number), lo.and_then(parse_number)) {
                (Some(la), Some(lo)) => to_web_mercator(lo, la),
                _ => None,
            };
            match projected {
                Some((e, n)) => (n, e),
                None => (NORTHING_SENTINEL, EASTING_SENTINEL),
            }
        })
        .unzip()
}

fn dedupe_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();
    for name in names {
        let name = name.to_string();
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 {
            headers.push(name);
        } else {
            headers.push(format!("{}.{}", name, count));
        }
        *count += 1;
    }
    headers
}
