//! MySQL implementation of the EvidenceRepository trait.
//!
//! `record_upload` inserts the document row and its audit entry on the same
//! transaction. Any failure before commit drops the transaction, which
//! rolls both inserts back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use nyaya_core::domain::entities::audit::AuditLog;
use nyaya_core::domain::entities::case::CaseId;
use nyaya_core::domain::entities::document::{Document, NewDocument};
use nyaya_core::domain::value_objects::StorageKey;
use nyaya_core::errors::DomainError;
use nyaya_core::repositories::EvidenceRepository;

use super::audit_repository_impl::append;
use crate::database::errors::{column, map_sqlx_error};

pub struct MySqlEvidenceRepository {
    pool: MySqlPool,
}

impl MySqlEvidenceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &MySqlRow) -> Result<Document, DomainError> {
        let id: String = column(row, "id")?;
        let storage_key: String = column(row, "storage_key")?;

        Ok(Document {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            case_id: column(row, "case_id")?,
            uploaded_by: column(row, "uploaded_by")?,
            storage_key: StorageKey::parse(&storage_key).map_err(|_| DomainError::Internal {
                message: format!("Invalid storage key stored: {}", storage_key),
            })?,
            location: column(row, "location")?,
            size_bytes: column(row, "size_bytes")?,
            is_verified: column(row, "is_verified")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

/// Failures inside the upload transaction. Unavailability stays retryable;
/// everything else is an integrity failure of the pair.
fn escalate(err: DomainError) -> DomainError {
    match err {
        transient @ DomainError::TransientStorage { .. } => transient,
        other => DomainError::Integrity {
            message: other.to_string(),
        },
    }
}

fn upload_error(err: sqlx::Error) -> DomainError {
    escalate(map_sqlx_error(err, "document"))
}

#[async_trait]
impl EvidenceRepository for MySqlEvidenceRepository {
    async fn record_upload(
        &self,
        document: NewDocument,
        audit: AuditLog,
    ) -> Result<Document, DomainError> {
        let mut tx = self.pool.begin().await.map_err(upload_error)?;

        sqlx::query(
            r#"
            INSERT INTO documents
                (id, case_id, uploaded_by, storage_key, location, size_bytes, is_verified, created_at)
            VALUES (?, ?, ?, ?, ?, ?, FALSE, ?)
            "#,
        )
        .bind(document.id.to_string())
        .bind(document.case_id)
        .bind(document.uploaded_by)
        .bind(document.storage_key().as_str())
        .bind(&document.location)
        .bind(document.size_bytes())
        .bind(document.created_at)
        .execute(&mut *tx)
        .await
        .map_err(upload_error)?;

        append(&mut *tx, &audit).await.map_err(escalate)?;

        tx.commit().await.map_err(|e| DomainError::CommitUnknown {
            message: format!("document commit failed: {}", e),
        })?;

        Ok(document.into_document())
    }

    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, case_id, uploaded_by, storage_key, location, size_bytes, is_verified, created_at
            FROM documents
            WHERE case_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "document"))?;

        rows.iter().map(Self::row_to_document).collect()
    }
}
