use thiserror::Error;

use super::reference::ReferenceKind;
use crate::storage::StoreError;

/// Request-level validation failures, rendered to the user as-is.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid character(s) in {kind} parameter: {reference}")]
    InvalidReference {
        kind: ReferenceKind,
        reference: String,
    },

    #[error("No such {kind} file found: {reference}")]
    MissingFile {
        kind: ReferenceKind,
        reference: String,
    },

    #[error("Only .csv extension allowed.")]
    UnsupportedExtension { filename: String },

    #[error("Failed to parse uploaded data.")]
    ParseError { reason: String },

    #[error("Ensure that \"key\", \"lat\", and \"lon\" columns exist.")]
    SchemaError { missing: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl GatewayError {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidReference { .. } => "INVALID_REFERENCE",
            Self::MissingFile { .. } => "MISSING_FILE",
            Self::UnsupportedExtension { .. } => "UNSUPPORTED_EXTENSION",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::SchemaError { .. } => "SCHEMA_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the client can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_user_wording() {
        let err = GatewayError::InvalidReference {
            kind: ReferenceKind::Config,
            reference: "../x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid character(s) in config parameter: ../x"
        );

        let err = GatewayError::MissingFile {
            kind: ReferenceKind::Data,
            reference: "report.csv".to_string(),
        };
        assert_eq!(err.to_string(), "No such data file found: report.csv");

        let err = GatewayError::SchemaError {
            missing: vec!["lat".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Ensure that \"key\", \"lat\", and \"lon\" columns exist."
        );
        assert_eq!(err.code(), "SCHEMA_ERROR");
    }
}
