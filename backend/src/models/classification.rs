//! Column classification.
//!
//! Every column is discrete (text), continuous (numeric) or quantileable
//! (numeric with enough distinct values for equal-frequency binning). Discrete
//! columns with few enough values are additionally colorable, one color per
//! value.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::selection::NONE_OPTION;

/// Distinct-value count a numeric column must exceed to be quantileable.
pub const DEFAULT_QUANTILE_THRESHOLD: usize = 20;

/// Grouping columns whose cardinality caps the discrete color count.
pub const DEFAULT_REFERENCE_COLUMNS: [&str; 2] = ["grp", "assign"];

/// Color cap used when none of the reference columns exist in the dataset.
pub const FALLBACK_DISCRETE_COLOR_LIMIT: usize = 20;

/// Tunables for [`ColumnClassification::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRules {
    pub quantile_threshold: usize,
    pub reference_columns: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            quantile_threshold: DEFAULT_QUANTILE_THRESHOLD,
            reference_columns: DEFAULT_REFERENCE_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Column names grouped by kind, each list in dataset column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub columns: Vec<String>,
    pub discrete: Vec<String>,
    pub discrete_colorable: Vec<String>,
    pub continuous: Vec<String>,
    pub quantileable: Vec<String>,
}

impl ColumnClassification {
    pub fn classify(dataset: &Dataset, rules: &ClassificationRules) -> Self {
        let color_limit = rules
            .reference_columns
            .iter()
            .filter_map(|name| dataset.column(name))
            .map(|c| c.distinct_count())
            .max()
            .unwrap_or(FALLBACK_DISCRETE_COLOR_LIMIT);

        let mut classification = Self {
            columns: dataset.column_names(),
            discrete: Vec::new(),
            discrete_colorable: Vec::new(),
            continuous: Vec::new(),
            quantileable: Vec::new(),
        };

        for column in dataset.columns() {
            let distinct = column.distinct_count();
            if column.is_numeric() {
                classification.continuous.push(column.name.clone());
                if distinct > rules.quantile_threshold {
                    classification.quantileable.push(column.name.clone());
                }
            } else {
                classification.discrete.push(column.name.clone());
                if distinct <= color_limit {
                    classification.discrete_colorable.push(column.name.clone());
                }
            }
        }

        classification
    }

    pub fn is_discrete(&self, name: &str) -> bool {
        self.discrete.iter().any(|c| c == name)
    }

    pub fn is_quantileable(&self, name: &str) -> bool {
        self.quantileable.iter().any(|c| c == name)
    }

    pub fn is_discrete_colorable(&self, name: &str) -> bool {
        self.discrete_colorable.iter().any(|c| c == name)
    }

    /// Options of the x and y dropdowns.
    pub fn axis_options(&self) -> Vec<String> {
        self.columns.clone()
    }

    /// Options of the size dropdown: `None` then the quantileable columns.
    pub fn size_options(&self) -> Vec<String> {
        std::iter::once(NONE_OPTION.to_string())
            .chain(self.quantileable.iter().cloned())
            .collect()
    }

    /// Options of the color dropdown: `None`, quantileable, discrete-colorable.
    pub fn color_options(&self) -> Vec<String> {
        std::iter::once(NONE_OPTION.to_string())
            .chain(self.quantileable.iter().cloned())
            .chain(self.discrete_colorable.iter().cloned())
            .collect()
    }
}
