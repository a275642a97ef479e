//! Public API surface.
//!
//! This file consolidates the DTO types served over HTTP.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::Axis;
pub use crate::routes::dashboard::AxisRange;
pub use crate::routes::dashboard::ButtonWidget;
pub use crate::routes::dashboard::CircleGlyph;
pub use crate::routes::dashboard::ColumnSource;
pub use crate::routes::dashboard::Controls;
pub use crate::routes::dashboard::DashboardView;
pub use crate::routes::dashboard::EncodedRowSet;
pub use crate::routes::dashboard::Figure;
pub use crate::routes::dashboard::LegendEntry;
pub use crate::routes::dashboard::SelectWidget;
pub use crate::routes::dashboard::TileLayer;
pub use crate::routes::upload::UploadStatus;

pub use crate::models::{EncodingSelection, SelectionEvent};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

/// Config (`c`) and data (`d`) references supplied by the client.
///
/// `None`, an empty string and the literal `"None"` all mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub d: Option<String>,
}

/// Session snapshot returned by the session endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    /// Resolved config file name, if a config was used.
    pub config: Option<String>,
    /// Resolved data file name.
    pub data: String,
    pub row_count: usize,
    pub view: DashboardView,
}
