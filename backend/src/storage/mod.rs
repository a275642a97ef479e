//! Storage for datasets, dashboard configs and uploads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Gateway / Session services                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  DatasetStore trait (repository.rs)                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ FsDatasetStore   (data dir)  │
//!     │ MemoryDatasetStore (tests)   │
//!     └──────────────────────────────┘
//! ```

pub mod checksum;
pub mod config;
pub mod dashboard_config;
pub mod error;
pub mod local;
pub mod memory;
pub mod repository;

pub use checksum::calculate_checksum;
pub use config::ServerConfig;
pub use dashboard_config::{DashboardConfig, SelectionDefaults};
pub use error::{ErrorContext, StoreError, StoreResult};
pub use local::FsDatasetStore;
pub use memory::MemoryDatasetStore;
pub use repository::{is_plain_name, DatasetStore};
