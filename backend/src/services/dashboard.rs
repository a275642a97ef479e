//! Dashboard loading: resolve the page parameters, read config and data from
//! the store, and start a session.

use std::sync::Arc;
use tracing::info;

use crate::api::{DashboardQuery, SessionView};
use crate::gateway::{resolve_references, ResolvedReferences};
use crate::models::ColumnClassification;
use crate::parsing::{parse_dataset, LoadError};
use crate::storage::{calculate_checksum, DashboardConfig, DatasetStore};

use super::session::{LoadedDashboard, SessionError, SessionStore};

/// Read the dashboard config, falling back to the built-in defaults.
pub async fn load_config(
    store: &dyn DatasetStore,
    name: Option<&str>,
) -> Result<DashboardConfig, SessionError> {
    let Some(name) = name else {
        return Ok(DashboardConfig::default());
    };
    let bytes = store.read(name).await?;
    DashboardConfig::from_bytes(&bytes).map_err(|message| SessionError::Config {
        name: name.to_string(),
        message,
    })
}

/// Load the referenced (or default) dataset and derive its initial state.
pub async fn open_dashboard(
    store: &dyn DatasetStore,
    refs: &ResolvedReferences,
    default_data: &str,
) -> Result<LoadedDashboard, SessionError> {
    let config = load_config(store, refs.config.as_deref()).await?;
    let data = refs
        .data
        .clone()
        .unwrap_or_else(|| default_data.to_string());

    let bytes = store.read(&data).await.map_err(|e| {
        if e.is_not_found() {
            SessionError::Load(LoadError::NotFound { path: data.clone() })
        } else {
            SessionError::Storage(e)
        }
    })?;

    let checksum = calculate_checksum(&bytes);
    let rules = config.rules();
    let (dataset, classification) = tokio::task::spawn_blocking(move || {
        parse_dataset(&bytes).map(|dataset| {
            let classification = ColumnClassification::classify(&dataset, &rules);
            (dataset, classification)
        })
    })
    .await
    .map_err(|e| SessionError::Task(e.to_string()))??;

    info!(
        data = %data,
        rows = dataset.row_count(),
        columns = classification.columns.len(),
        quantileable = classification.quantileable.len(),
        discrete = classification.discrete.len(),
        checksum = %checksum,
        "Dataset loaded"
    );

    let selection = config.initial_selection(&classification);
    Ok(LoadedDashboard {
        title: config.title,
        config: refs.config.clone(),
        data,
        dataset: Arc::new(dataset),
        classification,
        selection,
    })
}

/// Validate the page parameters, load the dashboard and register a session.
pub async fn start_session(
    store: &dyn DatasetStore,
    sessions: &SessionStore,
    query: &DashboardQuery,
    default_data: &str,
) -> Result<SessionView, SessionError> {
    let refs = resolve_references(store, query.c.as_deref(), query.d.as_deref()).await?;
    let loaded = open_dashboard(store, &refs, default_data).await?;

    let sessions = sessions.clone();
    tokio::task::spawn_blocking(move || sessions.create(loaded))
        .await
        .map_err(|e| SessionError::Task(e.to_string()))
}
