//! Validation and storage of uploaded CSV files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::GatewayError;
use crate::parsing::read_table;
use crate::storage::{calculate_checksum, DatasetStore};

/// Columns every uploaded dataset must carry.
pub const REQUIRED_UPLOAD_COLUMNS: [&str; 3] = ["key", "lat", "lon"];

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Name the file was stored under; usable as the `d` parameter.
    pub id: String,
    pub rows: usize,
    pub checksum: String,
}

pub fn has_csv_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Check extension, parseability and required columns, in that order.
///
/// Returns the number of data rows.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<usize, GatewayError> {
    if !has_csv_extension(filename) {
        return Err(GatewayError::UnsupportedExtension {
            filename: filename.to_string(),
        });
    }

    let table = read_table(bytes).map_err(|e| GatewayError::ParseError {
        reason: e.to_string(),
    })?;

    let missing: Vec<String> = REQUIRED_UPLOAD_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(GatewayError::SchemaError { missing });
    }

    Ok(table.row_count())
}

/// Fresh identifier for an uploaded file: 32 lowercase hex characters.
pub fn new_upload_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate an upload and persist it under a fresh identifier.
pub async fn accept_upload(
    store: &dyn DatasetStore,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<UploadReceipt, GatewayError> {
    let name = filename.to_string();
    let (bytes, validated) = tokio::task::spawn_blocking(move || {
        let validated = validate_upload(&name, &bytes);
        (bytes, validated)
    })
    .await
    .map_err(|e| GatewayError::ParseError {
        reason: format!("validation task failed: {}", e),
    })?;

    let rows = match validated {
        Ok(rows) => rows,
        Err(e) => {
            match &e {
                GatewayError::ParseError { reason } => {
                    warn!(filename, reason = %reason, "Upload rejected: {}", e)
                }
                _ => warn!(filename, "Upload rejected: {}", e),
            }
            return Err(e);
        }
    };

    let id = new_upload_id();
    let checksum = calculate_checksum(&bytes);
    store.write(&id, &bytes).await?;

    info!(
        filename,
        id = %id,
        rows,
        checksum = %checksum,
        "Upload stored"
    );

    Ok(UploadReceipt { id, rows, checksum })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDatasetStore;

    const VALID: &[u8] = b"key,lat,lon,LD1\nA,45.0,-122.0,0.5\nB,46.0,-121.0,0.7\n";

    #[test]
    fn test_extension_check() {
        assert!(has_csv_extension("bears.csv"));
        assert!(has_csv_extension("BEARS.CSV"));
        assert!(!has_csv_extension("bears.txt"));
        assert!(!has_csv_extension("bears.csv.exe"));
        assert!(!has_csv_extension("csv"));
    }

    #[test]
    fn test_non_csv_rejected_before_parsing() {
        let err = validate_upload("data.xlsx", VALID).unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedExtension { .. }));
        assert_eq!(err.to_string(), "Only .csv extension allowed.");
    }

    #[test]
    fn test_missing_lat_is_schema_error() {
        let err = validate_upload("x.csv", b"key,lon\nA,1\n").unwrap_err();
        match err {
            GatewayError::SchemaError { missing } => assert_eq!(missing, vec!["lat".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_is_parse_error() {
        let err = validate_upload("x.csv", b"").unwrap_err();
        assert!(matches!(err, GatewayError::ParseError { .. }));
        assert_eq!(err.to_string(), "Failed to parse uploaded data.");
    }

    #[test]
    fn test_upload_id_shape() {
        let id = new_upload_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_upload_id());
    }

    #[tokio::test]
    async fn test_accept_stores_under_fresh_id() {
        let store = MemoryDatasetStore::new();
        let receipt = accept_upload(&store, "bears.csv", VALID.to_vec())
            .await
            .unwrap();

        assert_eq!(receipt.rows, 2);
        assert_eq!(receipt.checksum, calculate_checksum(VALID));
        assert_eq!(store.read(&receipt.id).await.unwrap(), VALID);

        let second = accept_upload(&store, "bears.csv", VALID.to_vec())
            .await
            .unwrap();
        assert_ne!(receipt.id, second.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_upload_is_not_stored() {
        let store = MemoryDatasetStore::new();
        assert!(accept_upload(&store, "bears.csv", b"key,lon\n1,2\n".to_vec())
            .await
            .is_err());
        assert!(store.is_empty());
    }
}
