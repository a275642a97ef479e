use serde::{Deserialize, Serialize};

/// Status payload returned by the upload endpoint.
///
/// The field names are what the upload widget expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub success: bool,
    #[serde(rename = "newUuid", skip_serializing_if = "Option::is_none")]
    pub new_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadStatus {
    pub fn accepted(id: impl Into<String>) -> Self {
        Self {
            success: true,
            new_uuid: Some(id.into()),
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            new_uuid: None,
            error: Some(message.into()),
        }
    }
}
