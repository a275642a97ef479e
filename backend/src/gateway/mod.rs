//! Request-facing validation: page parameters, uploads and the help page.
//!
//! The gateway only prepares files in the data directory; it never builds
//! dashboards itself.

pub mod error;
pub mod help;
pub mod reference;
pub mod upload;

pub use error::GatewayError;
pub use help::{render_help, HelpDocument, TocEntry};
pub use reference::{
    resolve_reference, resolve_references, validate_reference, ReferenceKind, ResolvedReferences,
};
pub use upload::{accept_upload, validate_upload, UploadReceipt, REQUIRED_UPLOAD_COLUMNS};
