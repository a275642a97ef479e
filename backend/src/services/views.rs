//! View builder: turns an encoded row set into the two linked panels and the
//! control widgets. Holds no state of its own.

use crate::api::{
    Axis, AxisRange, ButtonWidget, CircleGlyph, Controls, DashboardView, EncodedRowSet, Figure,
    SelectWidget, TileLayer,
};
use crate::models::{ColumnClassification, EncodingSelection};

/// Half-width of the square Web Mercator frame shown by the map, in meters.
pub const MAP_BOUND: f64 = 20_000_000.0;

pub const CROSSFILTER_WIDTH: u32 = 800;
pub const CROSSFILTER_HEIGHT: u32 = 600;
pub const MAP_SIZE: u32 = 600;
pub const PLOT_TOOLS: &str = "wheel_zoom,reset,box_select";

pub const TERRAIN_TILE_URL: &str = "https://tile.stamen.com/terrain/{Z}/{X}/{Y}.png";
pub const TERRAIN_ATTRIBUTION: &str =
    "Map tiles by Stamen Design, under CC BY 3.0. Data by OpenStreetMap, under ODbL";

pub const APPLY_JITTER_LABEL: &str = "apply jitter to map";
pub const REMOVE_JITTER_LABEL: &str = "remove jitter from map";

/// Build the full dashboard view for the current state of a session.
pub fn build_dashboard(
    title: &str,
    classification: &ColumnClassification,
    selection: &EncodingSelection,
    rows: &EncodedRowSet,
    jittered: bool,
) -> DashboardView {
    DashboardView {
        title: title.to_string(),
        selection: selection.clone(),
        controls: build_controls(classification, selection),
        crossfilter: build_crossfilter(selection, rows),
        map: build_map(),
        source: rows.source.clone(),
        color_legend: rows.color_legend.clone(),
        size_legend: rows.size_legend.clone(),
        jittered,
    }
}

/// Scatter plot of the selected x/y columns.
pub fn build_crossfilter(selection: &EncodingSelection, rows: &EncodedRowSet) -> Figure {
    let x_title = title_case(&selection.x);
    let y_title = title_case(&selection.y);

    let x_range = categorical_or_auto(rows.x_range.as_ref());
    let x_label_orientation = match x_range {
        AxisRange::Categorical { .. } => Some(std::f64::consts::FRAC_PI_4),
        _ => None,
    };

    Figure {
        title: Some(format!("{} vs {}", x_title, y_title)),
        width: CROSSFILTER_WIDTH,
        height: CROSSFILTER_HEIGHT,
        tools: PLOT_TOOLS.to_string(),
        x_axis: Axis {
            label: Some(x_title),
            range: x_range,
            visible: true,
            label_orientation: x_label_orientation,
        },
        y_axis: Axis {
            label: Some(y_title),
            range: categorical_or_auto(rows.y_range.as_ref()),
            visible: true,
            label_orientation: None,
        },
        glyph: CircleGlyph {
            x: "xs".to_string(),
            y: "ys".to_string(),
            color: "color".to_string(),
            size: "size".to_string(),
            line_color: "white".to_string(),
            alpha: 0.6,
            hover_color: None,
            hover_alpha: None,
        },
        tile: None,
    }
}

/// Geographic overlay on a fixed Web Mercator frame.
pub fn build_map() -> Figure {
    let fixed = || AxisRange::Fixed {
        start: -MAP_BOUND,
        end: MAP_BOUND,
    };
    let hidden = |range| Axis {
        label: None,
        range,
        visible: false,
        label_orientation: None,
    };

    Figure {
        title: None,
        width: MAP_SIZE,
        height: MAP_SIZE,
        tools: PLOT_TOOLS.to_string(),
        x_axis: hidden(fixed()),
        y_axis: hidden(fixed()),
        glyph: CircleGlyph {
            x: "es".to_string(),
            y: "ns".to_string(),
            color: "color".to_string(),
            size: "size".to_string(),
            line_color: "white".to_string(),
            alpha: 0.6,
            hover_color: Some("white".to_string()),
            hover_alpha: Some(0.5),
        },
        tile: Some(TileLayer {
            name: "STAMEN_TERRAIN".to_string(),
            url: TERRAIN_TILE_URL.to_string(),
            attribution: TERRAIN_ATTRIBUTION.to_string(),
        }),
    }
}

pub fn build_controls(
    classification: &ColumnClassification,
    selection: &EncodingSelection,
) -> Controls {
    Controls {
        x: SelectWidget {
            title: "X-Axis".to_string(),
            value: selection.x.clone(),
            options: classification.axis_options(),
        },
        y: SelectWidget {
            title: "Y-Axis".to_string(),
            value: selection.y.clone(),
            options: classification.axis_options(),
        },
        color: SelectWidget {
            title: "Color".to_string(),
            value: selection.color_value().to_string(),
            options: classification.color_options(),
        },
        size: SelectWidget {
            title: "Size".to_string(),
            value: selection.size_value().to_string(),
            options: classification.size_options(),
        },
        jitter: vec![
            ButtonWidget {
                label: APPLY_JITTER_LABEL.to_string(),
                action: "apply_jitter".to_string(),
            },
            ButtonWidget {
                label: REMOVE_JITTER_LABEL.to_string(),
                action: "remove_jitter".to_string(),
            },
        ],
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_is_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if previous_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_alpha = true;
        } else {
            out.push(ch);
            previous_is_alpha = false;
        }
    }
    out
}

fn categorical_or_auto(factors: Option<&Vec<String>>) -> AxisRange {
    match factors {
        Some(f) => AxisRange::Categorical { factors: f.clone() },
        None => AxisRange::Auto,
    }
}
