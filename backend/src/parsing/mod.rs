//! Dataset loading: CSV parsing, type inference and missing-value handling.

pub mod csv_loader;
pub mod error;
pub mod projection;

#[cfg(test)]
#[path = "csv_loader_tests.rs"]
mod csv_loader_tests;

pub use csv_loader::{load_dataset, parse_dataset, read_table, RawTable};
pub use error::LoadError;
