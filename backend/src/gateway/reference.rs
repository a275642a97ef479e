//! Validation of the `c` (config) and `d` (data) page parameters.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::GatewayError;
use crate::models::selection::NONE_OPTION;
use crate::storage::DatasetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Config,
    Data,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Config => f.write_str("config"),
            ReferenceKind::Data => f.write_str("data"),
        }
    }
}

/// References that passed validation and name existing files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReferences {
    pub config: Option<String>,
    pub data: Option<String>,
}

/// Whether a reference is made only of ASCII alphanumerics, `.`, `-` and `_`.
pub fn is_safe_reference(reference: &str) -> bool {
    reference
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Map an absent, empty or `"None"` parameter to `None`.
pub fn normalize_reference(reference: Option<&str>) -> Option<&str> {
    match reference {
        None | Some("") | Some(NONE_OPTION) => None,
        Some(r) => Some(r),
    }
}

/// Character check only; does not touch storage.
pub fn validate_reference(kind: ReferenceKind, reference: &str) -> Result<(), GatewayError> {
    if is_safe_reference(reference) && reference != "." && reference != ".." {
        Ok(())
    } else {
        Err(GatewayError::InvalidReference {
            kind,
            reference: reference.to_string(),
        })
    }
}

/// Validate a reference and check that it names an existing file.
pub async fn resolve_reference(
    store: &dyn DatasetStore,
    kind: ReferenceKind,
    reference: Option<&str>,
) -> Result<Option<String>, GatewayError> {
    let Some(reference) = normalize_reference(reference) else {
        return Ok(None);
    };

    if let Err(e) = validate_reference(kind, reference) {
        warn!("{}", e);
        return Err(e);
    }

    if !store.exists(reference).await? {
        let err = GatewayError::MissingFile {
            kind,
            reference: reference.to_string(),
        };
        info!("{}", err);
        return Err(err);
    }

    Ok(Some(reference.to_string()))
}

/// Resolve both page parameters; the config is checked first.
pub async fn resolve_references(
    store: &dyn DatasetStore,
    config: Option<&str>,
    data: Option<&str>,
) -> Result<ResolvedReferences, GatewayError> {
    let config = resolve_reference(store, ReferenceKind::Config, config).await?;
    let data = resolve_reference(store, ReferenceKind::Data, data).await?;
    Ok(ResolvedReferences { config, data })
}
