//! Encoding pipeline: selection + dataset → per-row visual attributes.
//!
//! [`encode`] is a pure function of its inputs. It never fails: unknown or
//! unusable columns fall back to the constant default encodings.

use std::collections::{BTreeSet, HashMap};

use crate::api::{ColumnSource, EncodedRowSet, LegendEntry};
use crate::models::dataset::{Cell, Column, Dataset, MISSING_PLACEHOLDER};
use crate::models::{ColumnClassification, EncodingSelection};
use crate::parsing::csv_loader::parse_number;

use super::palette::EncodingTables;
use super::quantile::{qcut, QuantileBins};

/// Compute the full encoded row set for a selection.
pub fn encode(
    dataset: &Dataset,
    classification: &ColumnClassification,
    selection: &EncodingSelection,
    tables: &EncodingTables,
) -> EncodedRowSet {
    let (size, size_legend) = encode_size(dataset, selection.size.as_deref(), tables);
    let (color, color_legend) = encode_color(
        dataset,
        classification,
        selection.color.as_deref(),
        tables,
    );
    let (northing, easting) = dataset.map_coordinates();

    EncodedRowSet {
        source: ColumnSource {
            ns: northing.clone(),
            es: easting.clone(),
            xs: axis_cells(dataset, &selection.x),
            ys: axis_cells(dataset, &selection.y),
            northing,
            easting,
            color,
            size,
        },
        x_range: axis_factors(dataset, classification, &selection.x),
        y_range: axis_factors(dataset, classification, &selection.y),
        color_legend,
        size_legend,
    }
}

/// Marker sizes: quantile bucket of the size column mapped through the size scale.
pub fn encode_size(
    dataset: &Dataset,
    column: Option<&str>,
    tables: &EncodingTables,
) -> (Vec<u32>, Vec<LegendEntry>) {
    let values = column
        .and_then(|name| dataset.column(name))
        .and_then(Column::as_numeric);

    match values {
        Some(values) => {
            let bins = qcut(values, tables.sizes.len());
            let sizes = bins.codes.iter().map(|&c| tables.size_for(c)).collect();
            let legend = quantile_legend(&bins, tables.sizes.len(), |j| LegendEntry {
                label: String::new(),
                color: None,
                size: Some(tables.size_for(j)),
            });
            (sizes, legend)
        }
        None => (vec![tables.default_size; dataset.row_count()], Vec::new()),
    }
}

/// Marker colors.
///
/// Quantileable columns are bucketed onto the quantile gradient;
/// discrete-colorable columns get one gradient color per sorted category.
pub fn encode_color(
    dataset: &Dataset,
    classification: &ColumnClassification,
    column: Option<&str>,
    tables: &EncodingTables,
) -> (Vec<String>, Vec<LegendEntry>) {
    let default = || {
        (
            vec![tables.default_color.clone(); dataset.row_count()],
            Vec::new(),
        )
    };

    let Some(name) = column else {
        return default();
    };
    let Some(col) = dataset.column(name) else {
        return default();
    };

    if classification.is_quantileable(name) {
        let Some(values) = col.as_numeric() else {
            return default();
        };
        let buckets = tables.quantile_colors.len();
        let bins = qcut(values, buckets);
        let colors = bins
            .codes
            .iter()
            .map(|&c| tables.quantile_color_for(c).to_string())
            .collect();
        let legend = quantile_legend(&bins, buckets, |j| LegendEntry {
            label: String::new(),
            color: Some(tables.quantile_color_for(j).to_string()),
            size: None,
        });
        (colors, legend)
    } else if classification.is_discrete_colorable(name) {
        let labels: Vec<String> = col.cells().iter().map(Cell::label).collect();
        let categories = sort_categories(labels.iter().map(String::as_str));
        let palette = tables.categorical_colors(categories.len());
        let index: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let colors = labels
            .iter()
            .map(|l| {
                index
                    .get(l.as_str())
                    .and_then(|&i| palette.get(i))
                    .cloned()
                    .unwrap_or_else(|| tables.default_color.clone())
            })
            .collect();
        let legend = categories
            .iter()
            .zip(palette.iter())
            .map(|(label, color)| LegendEntry {
                label: label.clone(),
                color: Some(color.clone()),
                size: None,
            })
            .collect();
        (colors, legend)
    } else {
        default()
    }
}

/// Distinct values in display order.
///
/// If every value other than the missing placeholder parses as a number the
/// values are ordered numerically (placeholder last); otherwise lexically.
pub fn sort_categories<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.into_iter().collect();
    let has_placeholder = distinct.contains(MISSING_PLACEHOLDER);

    let numeric: Option<Vec<(f64, &str)>> = distinct
        .iter()
        .filter(|v| **v != MISSING_PLACEHOLDER)
        .map(|v| parse_number(v).map(|n| (n, *v)))
        .collect();

    match numeric {
        Some(mut pairs) if !pairs.is_empty() => {
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
            let mut sorted: Vec<String> = pairs.into_iter().map(|(_, v)| v.to_string()).collect();
            if has_placeholder {
                sorted.push(MISSING_PLACEHOLDER.to_string());
            }
            sorted
        }
        _ => distinct.into_iter().map(str::to_string).collect(),
    }
}

/// Categorical axis domain for discrete columns, `None` for auto-scaled ones.
pub fn axis_factors(
    dataset: &Dataset,
    classification: &ColumnClassification,
    name: &str,
) -> Option<Vec<String>> {
    if !classification.is_discrete(name) {
        return None;
    }
    let column = dataset.column(name)?;
    let labels: Vec<String> = column.cells().iter().map(Cell::label).collect();
    Some(sort_categories(labels.iter().map(String::as_str)))
}

fn axis_cells(dataset: &Dataset, name: &str) -> Vec<Cell> {
    dataset
        .column(name)
        .map(Column::cells)
        .unwrap_or_else(|| vec![Cell::Text(MISSING_PLACEHOLDER.to_string()); dataset.row_count()])
}

fn quantile_legend(
    bins: &QuantileBins,
    buckets: usize,
    entry: impl Fn(usize) -> LegendEntry,
) -> Vec<LegendEntry> {
    if bins.edges.len() != buckets + 1 {
        return Vec::new();
    }
    (0..buckets)
        .map(|j| {
            let open = if j == 0 { '[' } else { '(' };
            let mut e = entry(j);
            e.label = format!(
                "{}{}, {}]",
                open,
                format_edge(bins.edges[j]),
                format_edge(bins.edges[j + 1])
            );
            e
        })
        .collect()
}

fn format_edge(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
