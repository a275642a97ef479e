//! Data Transfer Objects for the HTTP API.
//!
//! Dashboard DTOs are re-exported from the api module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{DashboardQuery, DashboardView, SelectionEvent, SessionView, UploadStatus};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the server
    pub version: String,
    /// Number of open dashboard sessions
    pub sessions: usize,
    /// Storage backend description
    pub storage: String,
}
