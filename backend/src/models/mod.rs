//! Core data model: datasets, column classification and encoding selection.

pub mod classification;
pub mod dataset;
pub mod selection;

pub use classification::{ClassificationRules, ColumnClassification};
pub use dataset::{Cell, Column, ColumnValues, Dataset};
pub use selection::{Channel, EncodingSelection, SelectionEvent};
