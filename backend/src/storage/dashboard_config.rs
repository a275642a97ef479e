//! Per-dashboard TOML config, selected with the `c` parameter.
//!
//! ```toml
//! title = "Bear genetics"
//! reference_columns = ["grp", "assign"]
//! quantile_threshold = 20
//!
//! [defaults]
//! x = "LD1"
//! y = "LD2"
//! size = "posterior_assign"
//! color = "None"
//! ```

use serde::{Deserialize, Serialize};

use crate::models::classification::{DEFAULT_QUANTILE_THRESHOLD, DEFAULT_REFERENCE_COLUMNS};
use crate::models::{ClassificationRules, ColumnClassification, EncodingSelection, SelectionEvent};

pub const DEFAULT_TITLE: &str = "Crossfilter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub defaults: SelectionDefaults,
    pub reference_columns: Vec<String>,
    pub quantile_threshold: usize,
}

/// Initial column for each channel. `"None"` clears size or color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionDefaults {
    pub x: String,
    pub y: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            x: "LD1".to_string(),
            y: "LD2".to_string(),
            size: Some("posterior_assign".to_string()),
            color: Some("assign".to_string()),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            defaults: SelectionDefaults::default(),
            reference_columns: DEFAULT_REFERENCE_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quantile_threshold: DEFAULT_QUANTILE_THRESHOLD,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let text = std::str::from_utf8(bytes).map_err(|e| format!("config is not UTF-8: {}", e))?;
        Self::from_toml(text).map_err(|e| e.to_string())
    }

    pub fn rules(&self) -> ClassificationRules {
        ClassificationRules {
            quantile_threshold: self.quantile_threshold,
            reference_columns: self.reference_columns.clone(),
        }
    }

    /// Starting selection for a dataset.
    ///
    /// A default the dataset cannot honor falls back: x to the first column,
    /// y to the second (or the first when there is only one), size and color
    /// to none.
    pub fn initial_selection(&self, classification: &ColumnClassification) -> EncodingSelection {
        let columns = &classification.columns;
        let first = columns.first().cloned().unwrap_or_default();
        let second = columns.get(1).cloned().unwrap_or_else(|| first.clone());

        let pick_axis = |wanted: &str, fallback: String| {
            if columns.iter().any(|c| c == wanted) {
                wanted.to_string()
            } else {
                fallback
            }
        };
        let x = pick_axis(&self.defaults.x, first);
        let y = pick_axis(&self.defaults.y, second);

        let size = SelectionEvent::optional_column(self.defaults.size.as_deref())
            .filter(|c| classification.is_quantileable(c));
        let color = SelectionEvent::optional_column(self.defaults.color.as_deref())
            .filter(|c| classification.color_options().iter().any(|o| o == c));

        EncodingSelection::new(x, y)
            .with_size(size.as_deref())
            .with_color(color.as_deref())
    }
}
