//! Evidence document metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::case::CaseId;
use super::user::UserId;
use crate::domain::value_objects::{DurableArtifact, StorageKey};

pub type DocumentId = Uuid;

/// Lifecycle of a document. There is no deleted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// Recorded by evidence intake, awaiting the verification workflow
    Unverified,
    Verified,
}

/// A recorded evidence document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub case_id: CaseId,
    pub uploaded_by: UserId,
    pub storage_key: StorageKey,
    /// Client-visible reference to the artifact
    pub location: String,
    pub size_bytes: u64,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn state(&self) -> DocumentState {
        if self.is_verified {
            DocumentState::Verified
        } else {
            DocumentState::Unverified
        }
    }
}

/// Metadata for a document about to be recorded.
///
/// Can only be built from a [`DurableArtifact`], so a document row can
/// never point at bytes that were not confirmed durable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub id: DocumentId,
    pub case_id: CaseId,
    pub uploaded_by: UserId,
    artifact: DurableArtifact,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl NewDocument {
    pub fn new(
        case_id: CaseId,
        uploaded_by: UserId,
        artifact: DurableArtifact,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            case_id,
            uploaded_by,
            artifact,
            location: location.into(),
            created_at: Utc::now(),
        }
    }

    pub fn storage_key(&self) -> &StorageKey {
        self.artifact.key()
    }

    pub fn size_bytes(&self) -> u64 {
        self.artifact.size_bytes()
    }

    /// The row as it reads back after commit
    pub fn into_document(self) -> Document {
        Document {
            id: self.id,
            case_id: self.case_id,
            uploaded_by: self.uploaded_by,
            storage_key: self.artifact.key().clone(),
            location: self.location,
            size_bytes: self.artifact.size_bytes(),
            is_verified: false,
            created_at: self.created_at,
        }
    }
}
