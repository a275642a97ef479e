use serde::{Deserialize, Serialize};

/// Widget value meaning "no column drives this channel".
pub const NONE_OPTION: &str = "None";

/// The columns currently driving each visual channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSelection {
    pub x: String,
    pub y: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl EncodingSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            size: None,
            color: None,
        }
    }

    pub fn with_size(mut self, size: Option<&str>) -> Self {
        self.size = size.map(str::to_string);
        self
    }

    pub fn with_color(mut self, color: Option<&str>) -> Self {
        self.color = color.map(str::to_string);
        self
    }

    /// Widget value for the size dropdown.
    pub fn size_value(&self) -> &str {
        self.size.as_deref().unwrap_or(NONE_OPTION)
    }

    /// Widget value for the color dropdown.
    pub fn color_value(&self) -> &str {
        self.color.as_deref().unwrap_or(NONE_OPTION)
    }
}

/// The dropdown a selection change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Size,
    Color,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Size => "size",
            Channel::Color => "color",
        };
        f.write_str(name)
    }
}

/// A UI event delivered to a dashboard session.
///
/// Size and color accept either `null` or the `"None"` widget value to clear
/// the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    SetX { column: String },
    SetY { column: String },
    SetSize { column: Option<String> },
    SetColor { column: Option<String> },
    ApplyJitter,
    RemoveJitter,
}

impl SelectionEvent {
    /// Normalize a dropdown value, mapping the `"None"` option to `None`.
    pub fn optional_column(value: Option<&str>) -> Option<String> {
        match value {
            None | Some(NONE_OPTION) | Some("") => None,
            Some(v) => Some(v.to_string()),
        }
    }
}
