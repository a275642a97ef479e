use serde::{Deserialize, Serialize};

use crate::models::dataset::Cell;
use crate::models::EncodingSelection;

/// Column data source shared by both panels.
///
/// `ns`/`es` are the displayed map coordinates (possibly jittered);
/// `northing`/`easting` keep the unperturbed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSource {
    pub ns: Vec<f64>,
    pub es: Vec<f64>,
    pub xs: Vec<Cell>,
    pub ys: Vec<Cell>,
    pub northing: Vec<f64>,
    pub easting: Vec<f64>,
    pub color: Vec<String>,
    pub size: Vec<u32>,
}

impl ColumnSource {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// One legend key: a bucket interval or category label with its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Output of the encoding pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRowSet {
    pub source: ColumnSource,
    /// Categorical domain of a discrete x column.
    pub x_range: Option<Vec<String>>,
    /// Categorical domain of a discrete y column.
    pub y_range: Option<Vec<String>>,
    pub color_legend: Vec<LegendEntry>,
    pub size_legend: Vec<LegendEntry>,
}

/// Axis range of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AxisRange {
    /// Scaled by the renderer to fit the data.
    Auto,
    Categorical { factors: Vec<String> },
    Fixed { start: f64, end: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
    pub range: AxisRange,
    pub visible: bool,
    /// Tick label rotation in radians.
    pub label_orientation: Option<f64>,
}

/// Circle glyph reading its fields from the [`ColumnSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleGlyph {
    pub x: String,
    pub y: String,
    pub color: String,
    pub size: String,
    pub line_color: String,
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_alpha: Option<f64>,
}

/// Background map tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

/// One plot panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub tools: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub glyph: CircleGlyph,
    pub tile: Option<TileLayer>,
}

/// Dropdown widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectWidget {
    pub title: String,
    pub value: String,
    pub options: Vec<String>,
}

/// Button widget; `action` names the event it sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonWidget {
    pub label: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub x: SelectWidget,
    pub y: SelectWidget,
    pub color: SelectWidget,
    pub size: SelectWidget,
    pub jitter: Vec<ButtonWidget>,
}

/// Everything the browser needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub selection: EncodingSelection,
    pub controls: Controls,
    pub crossfilter: Figure,
    pub map: Figure,
    pub source: ColumnSource,
    pub color_legend: Vec<LegendEntry>,
    pub size_legend: Vec<LegendEntry>,
    pub jittered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_tagging() {
        let json = serde_json::to_value(AxisRange::Fixed {
            start: -1.0,
            end: 1.0,
        })
        .unwrap();
        assert_eq!(json["type"], "fixed");
        assert_eq!(json["start"], -1.0);

        let json = serde_json::to_value(AxisRange::Auto).unwrap();
        assert_eq!(json["type"], "auto");
    }

    #[test]
    fn test_legend_entry_skips_absent_channels() {
        let entry = LegendEntry {
            label: "a".to_string(),
            color: Some("#000000".to_string()),
            size: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("size"));
    }
}
