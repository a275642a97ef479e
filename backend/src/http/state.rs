//! Application state for the HTTP server.

use std::sync::Arc;

use super::pages::Pages;
use crate::services::{EncodingTables, JitterSettings, SessionStore};
use crate::storage::{DatasetStore, ServerConfig};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Data directory holding datasets, configs and uploads
    pub store: Arc<dyn DatasetStore>,
    /// Live dashboard sessions
    pub sessions: SessionStore,
    pub pages: Arc<Pages>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state with the given store.
    pub fn new(
        store: Arc<dyn DatasetStore>,
        config: ServerConfig,
    ) -> Result<Self, minijinja::Error> {
        let sessions = SessionStore::new(
            EncodingTables::default(),
            JitterSettings::with_seed(config.jitter_seed),
        )
        .with_idle_ttl(config.session_ttl());
        Ok(Self {
            store,
            sessions,
            pages: Arc::new(Pages::new()?),
            config: Arc::new(config),
        })
    }
}
