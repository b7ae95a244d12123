//! Evidence upload response

use serde::{Deserialize, Serialize};

use nyaya_core::domain::entities::document::DocumentId;
use nyaya_core::services::IntakeReceipt;

/// Body of a `201 Created` upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Public location of the stored artifact
    pub url: String,
    pub document_id: DocumentId,
    pub storage_key: String,
}

impl From<IntakeReceipt> for UploadResponse {
    fn from(receipt: IntakeReceipt) -> Self {
        Self {
            message: "Upload successful".to_string(),
            url: receipt.location,
            document_id: receipt.document_id,
            storage_key: receipt.storage_key.to_string(),
        }
    }
}
