//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;
use crate::parsing::LoadError;
use crate::services::SessionError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Dashboard session error
    Session(SessionError),
}

impl AppError {
    /// Status code and body for this error.
    pub fn parts(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Session(e) => session_parts(e),
        }
    }
}

fn session_parts(err: &SessionError) -> (StatusCode, ApiError) {
    let msg = err.to_string();
    match err {
        SessionError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            ApiError::new("SESSION_NOT_FOUND", msg),
        ),
        SessionError::InvalidSelection { channel, .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("INVALID_SELECTION", msg).with_details(format!("channel={}", channel)),
        ),
        SessionError::Reference(g) => {
            let status = match g {
                GatewayError::MissingFile { .. } => StatusCode::NOT_FOUND,
                g if g.is_client_error() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, ApiError::new(g.code(), msg))
        }
        SessionError::Load(LoadError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, ApiError::new("LOAD_ERROR", msg))
        }
        SessionError::Load(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("LOAD_ERROR", msg),
        ),
        SessionError::Config { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::new("CONFIG_ERROR", msg),
        ),
        SessionError::Storage(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("STORAGE_ERROR", msg).with_details(e.context().to_string()),
        ),
        SessionError::Task(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", msg),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        (status, Json(error)).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionId;
    use crate::gateway::ReferenceKind;
    use crate::models::Channel;

    #[test]
    fn test_session_error_statuses() {
        let (status, body) = AppError::from(SessionError::NotFound(SessionId::new())).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "SESSION_NOT_FOUND");

        let (status, body) = AppError::from(SessionError::InvalidSelection {
            channel: Channel::Color,
            column: "x".to_string(),
        })
        .parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details.as_deref(), Some("channel=color"));

        let (status, body) = AppError::from(SessionError::Reference(
            GatewayError::InvalidReference {
                kind: ReferenceKind::Data,
                reference: "../x".to_string(),
            },
        ))
        .parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Invalid character(s) in data parameter: ../x");

        let (status, _) = AppError::from(SessionError::Reference(GatewayError::MissingFile {
            kind: ReferenceKind::Config,
            reference: "a.toml".to_string(),
        }))
        .parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("NOT_FOUND", "gone")).unwrap();
        assert!(json.get("details").is_none());
    }
}
