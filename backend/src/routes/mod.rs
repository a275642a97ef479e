pub mod dashboard;
pub mod upload;

/// Dashboard page; accepts `c` (config) and `d` (data) query parameters.
pub const INDEX: &str = "/";
pub const HELP: &str = "/help";
pub const UPLOAD_PAGE: &str = "/upload";
pub const UPLOAD: &str = "/server/upload";
pub const HEALTH: &str = "/health";
pub const STATIC: &str = "/stat";
pub const FAVICON: &str = "/favicon.ico";

pub const SESSIONS: &str = "/v1/sessions";
pub const SESSION: &str = "/v1/sessions/{session_id}";
pub const SESSION_EVENTS: &str = "/v1/sessions/{session_id}/events";
pub const SESSION_JITTER: &str = "/v1/sessions/{session_id}/jitter";
