//! HTTP handlers for pages, uploads and the session API.
//!
//! Each handler corresponds to an endpoint and delegates to the gateway and
//! service layers for the actual work.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use super::dto::{DashboardQuery, HealthResponse, SelectionEvent, SessionView, UploadStatus};
use super::error::AppError;
use super::state::AppState;
use crate::api::SessionId;
use crate::gateway::{accept_upload, render_help};
use crate::services::{start_session, SessionError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_session_id(raw: &str) -> Result<SessionId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid session id: {}", raw)))
}

fn page(rendered: Result<String, minijinja::Error>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template rendering failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

fn error_page(state: &AppState, err: SessionError) -> Response {
    let (status, body) = AppError::Session(err).parts();
    if status.is_server_error() {
        error!(code = %body.code, "Dashboard failed to load: {}", body.message);
    } else {
        warn!(code = %body.code, "Dashboard request rejected: {}", body.message);
    }
    let mut response = page(state.pages.error(&body.message));
    if response.status().is_success() {
        *response.status_mut() = status;
    }
    response
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.sessions.len(),
        storage: state.store.describe(),
    }))
}

// =============================================================================
// Pages
// =============================================================================

/// GET /?c=<config>&d=<data>
///
/// Validate the parameters, start a session and render the dashboard page.
/// Invalid parameters render the error page instead.
pub async fn index(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Response {
    match start_session(
        state.store.as_ref(),
        &state.sessions,
        &query,
        &state.config.default_data,
    )
    .await
    {
        Ok(session) => page(state.pages.embed(&session)),
        Err(e) => error_page(&state, e),
    }
}

/// GET /help
pub async fn help(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let markdown = tokio::fs::read_to_string(&state.config.help_page)
        .await
        .map_err(|e| {
            error!(
                path = %state.config.help_page.display(),
                "Failed to read help page: {}", e
            );
            AppError::NotFound("Help page not available".to_string())
        })?;
    let doc = tokio::task::spawn_blocking(move || render_help(&markdown))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state
        .pages
        .help(&doc)
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// GET /upload
pub async fn upload_page(State(state): State<AppState>) -> Response {
    page(state.pages.upload())
}

// =============================================================================
// Upload
// =============================================================================

/// POST /server/upload
///
/// Accepts a multipart form with one file. The original file name may be
/// overridden by a `qqfilename` text field. Always answers with an
/// [`UploadStatus`] payload.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Json<UploadStatus> {
    let mut filename_override: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed upload: {}", e);
                return Json(UploadStatus::rejected("Failed to parse uploaded data."));
            }
        };

        if field.name() == Some("qqfilename") {
            match field.text().await {
                Ok(name) => filename_override = Some(name),
                Err(e) => warn!("Unreadable qqfilename field: {}", e),
            }
            continue;
        }

        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        match field.bytes().await {
            Ok(bytes) => {
                if file.is_none() {
                    file = Some((name, bytes.to_vec()));
                }
            }
            Err(e) => {
                warn!("Failed to read uploaded file {}: {}", name, e);
                return Json(UploadStatus::rejected("Failed to parse uploaded data."));
            }
        }
    }

    let Some((name, bytes)) = file else {
        warn!("Upload request without a file");
        return Json(UploadStatus::rejected("No file received."));
    };
    let filename = filename_override.unwrap_or(name);

    let status = match accept_upload(state.store.as_ref(), &filename, bytes).await {
        Ok(receipt) => UploadStatus::accepted(receipt.id),
        Err(e) if e.is_client_error() => UploadStatus::rejected(e.to_string()),
        Err(e) => {
            error!(filename = %filename, "Upload could not be stored: {}", e);
            UploadStatus::rejected("Upload could not be stored.")
        }
    };
    info!(
        success = status.success,
        new_uuid = status.new_uuid.as_deref().unwrap_or(""),
        "Upload processed"
    );
    Json(status)
}

// =============================================================================
// Session API
// =============================================================================

/// POST /v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(query): Json<DashboardQuery>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = start_session(
        state.store.as_ref(),
        &state.sessions,
        &query,
        &state.config.default_data,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /v1/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionView> {
    let id = parse_session_id(&session_id)?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /v1/sessions/{session_id}/events
pub async fn post_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<SelectionEvent>,
) -> HandlerResult<SessionView> {
    let id = parse_session_id(&session_id)?;
    Ok(Json(state.sessions.handle(id, event).await?))
}

/// POST /v1/sessions/{session_id}/jitter
pub async fn apply_jitter(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionView> {
    let id = parse_session_id(&session_id)?;
    Ok(Json(
        state
            .sessions
            .handle(id, SelectionEvent::ApplyJitter)
            .await?,
    ))
}

/// DELETE /v1/sessions/{session_id}/jitter
pub async fn remove_jitter(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionView> {
    let id = parse_session_id(&session_id)?;
    Ok(Json(
        state
            .sessions
            .handle(id, SelectionEvent::RemoveJitter)
            .await?,
    ))
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_session_id(&session_id)?;
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
