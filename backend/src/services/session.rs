//! Dashboard sessions and the interaction state machine.
//!
//! Each page load owns one [`Session`]. Events for a session are applied
//! one at a time under its lock; different sessions never share state.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{EncodedRowSet, SessionId, SessionView};
use crate::gateway::GatewayError;
use crate::models::{Channel, ColumnClassification, Dataset, EncodingSelection, SelectionEvent};
use crate::parsing::LoadError;
use crate::storage::StoreError;

use super::encoding::encode;
use super::jitter::{apply_jitter, remove_jitter, JitterSettings};
use super::palette::EncodingTables;
use super::views::build_dashboard;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("'{column}' is not an available {channel} option")]
    InvalidSelection { channel: Channel, column: String },

    #[error(transparent)]
    Reference(#[from] GatewayError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid dashboard config {name}: {message}")]
    Config { name: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Effect of one event on a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Re-encode with a new selection.
    Reselect(EncodingSelection),
    ApplyJitter,
    RemoveJitter,
}

/// Validate an event against the dropdown options and compute its effect.
///
/// Invalid selections are rejected without touching the current selection.
pub fn transition(
    classification: &ColumnClassification,
    selection: &EncodingSelection,
    event: &SelectionEvent,
) -> Result<Transition, SessionError> {
    let check = |channel: Channel, column: &str, options: Vec<String>| {
        if options.iter().any(|o| o == column) {
            Ok(())
        } else {
            Err(SessionError::InvalidSelection {
                channel,
                column: column.to_string(),
            })
        }
    };

    let next = match event {
        SelectionEvent::SetX { column } => {
            check(Channel::X, column, classification.axis_options())?;
            EncodingSelection {
                x: column.clone(),
                ..selection.clone()
            }
        }
        SelectionEvent::SetY { column } => {
            check(Channel::Y, column, classification.axis_options())?;
            EncodingSelection {
                y: column.clone(),
                ..selection.clone()
            }
        }
        SelectionEvent::SetSize { column } => {
            let column = SelectionEvent::optional_column(column.as_deref());
            if let Some(c) = &column {
                check(Channel::Size, c, classification.size_options())?;
            }
            EncodingSelection {
                size: column,
                ..selection.clone()
            }
        }
        SelectionEvent::SetColor { column } => {
            let column = SelectionEvent::optional_column(column.as_deref());
            if let Some(c) = &column {
                check(Channel::Color, c, classification.color_options())?;
            }
            EncodingSelection {
                color: column,
                ..selection.clone()
            }
        }
        SelectionEvent::ApplyJitter => return Ok(Transition::ApplyJitter),
        SelectionEvent::RemoveJitter => return Ok(Transition::RemoveJitter),
    };

    Ok(Transition::Reselect(next))
}

/// A dataset ready to be shown, before a session is created for it.
#[derive(Debug, Clone)]
pub struct LoadedDashboard {
    pub title: String,
    pub config: Option<String>,
    pub data: String,
    pub dataset: Arc<Dataset>,
    pub classification: ColumnClassification,
    pub selection: EncodingSelection,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    title: String,
    config: Option<String>,
    data: String,
    dataset: Arc<Dataset>,
    classification: ColumnClassification,
    selection: EncodingSelection,
    rows: EncodedRowSet,
    jittered: bool,
    rng: StdRng,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        id: SessionId,
        loaded: LoadedDashboard,
        tables: &EncodingTables,
        jitter: &JitterSettings,
    ) -> Self {
        let rows = encode(
            &loaded.dataset,
            &loaded.classification,
            &loaded.selection,
            tables,
        );
        Self {
            id,
            title: loaded.title,
            config: loaded.config,
            data: loaded.data,
            dataset: loaded.dataset,
            classification: loaded.classification,
            selection: loaded.selection,
            rows,
            jittered: false,
            rng: jitter.rng(),
            updated_at: Utc::now(),
        }
    }

    /// Whether the session has seen no activity for longer than `ttl` at `now`.
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.updated_at)
            .to_std()
            .map(|idle| idle > ttl)
            .unwrap_or(false)
    }

    /// Apply one event. A new selection re-encodes every row and clears jitter.
    pub fn handle(
        &mut self,
        event: &SelectionEvent,
        tables: &EncodingTables,
        jitter: &JitterSettings,
    ) -> Result<(), SessionError> {
        match transition(&self.classification, &self.selection, event)? {
            Transition::Reselect(selection) => {
                self.rows = encode(&self.dataset, &self.classification, &selection, tables);
                self.selection = selection;
                self.jittered = false;
            }
            Transition::ApplyJitter => {
                apply_jitter(&mut self.rows.source, jitter.width, &mut self.rng);
                self.jittered = true;
            }
            Transition::RemoveJitter => {
                remove_jitter(&mut self.rows.source);
                self.jittered = false;
            }
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            config: self.config.clone(),
            data: self.data.clone(),
            row_count: self.dataset.row_count(),
            view: build_dashboard(
                &self.title,
                &self.classification,
                &self.selection,
                &self.rows,
                self.jittered,
            ),
        }
    }
}

/// In-memory session registry.
///
/// With an idle TTL set, sessions untouched for longer than the TTL are
/// dropped on every [`SessionStore::create`] and [`SessionStore::evict_idle`].
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>>,
    tables: Arc<EncodingTables>,
    jitter: JitterSettings,
    idle_ttl: Option<Duration>,
}

impl SessionStore {
    pub fn new(tables: EncodingTables, jitter: JitterSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            tables: Arc::new(tables),
            jitter,
            idle_ttl: None,
        }
    }

    pub fn with_idle_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.idle_ttl = ttl;
        self
    }

    /// Encode a loaded dataset and register a new session for it.
    ///
    /// CPU-bound; call from a blocking context for large datasets.
    pub fn create(&self, loaded: LoadedDashboard) -> SessionView {
        self.evict_idle();
        let session = Session::new(SessionId::new(), loaded, &self.tables, &self.jitter);
        let view = session.view();
        info!(
            session_id = %view.session_id,
            data = %view.data,
            rows = view.row_count,
            "Session created"
        );
        self.sessions
            .write()
            .insert(view.session_id, Arc::new(Mutex::new(session)));
        view
    }

    /// Drop idle sessions. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now())
    }

    /// Drop sessions idle at `now`. Sessions busy with an event are kept.
    pub fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.idle_ttl else {
            return 0;
        };
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Some(s) => !s.is_idle(now, ttl),
            None => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>, SessionError> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// Current view of a session, built on the calling thread.
    pub fn snapshot(&self, id: SessionId) -> Result<SessionView, SessionError> {
        Ok(self.get(id)?.lock().view())
    }

    /// Current view of a session, built on the blocking pool.
    pub async fn view(&self, id: SessionId) -> Result<SessionView, SessionError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.snapshot(id))
            .await
            .map_err(|e| SessionError::Task(e.to_string()))?
    }

    /// Apply an event synchronously and return the resulting view.
    pub fn dispatch(
        &self,
        id: SessionId,
        event: &SelectionEvent,
    ) -> Result<SessionView, SessionError> {
        let session = self.get(id)?;
        let mut session = session.lock();
        session.handle(event, &self.tables, &self.jitter)?;
        debug!(session_id = %id, ?event, "Session event applied");
        Ok(session.view())
    }

    /// Apply an event on the blocking pool.
    pub async fn handle(
        &self,
        id: SessionId,
        event: SelectionEvent,
    ) -> Result<SessionView, SessionError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.dispatch(id, &event))
            .await
            .map_err(|e| SessionError::Task(e.to_string()))?
    }

    pub fn remove(&self, id: SessionId) -> Result<(), SessionError> {
        match self.sessions.write().remove(&id) {
            Some(_) => {
                info!(session_id = %id, "Session closed");
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(EncodingTables::default(), JitterSettings::default())
    }
}
