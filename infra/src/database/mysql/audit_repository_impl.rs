//! MySQL persistence for audit log entries.
//!
//! Writes only happen through [`append`], which takes a connection that is
//! already inside the caller's transaction. The table itself rejects
//! updates and deletes (see the migration triggers).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlConnection, MySqlPool};
use uuid::Uuid;

use nyaya_core::domain::entities::audit::{AuditAction, AuditLog};
use nyaya_core::domain::entities::case::CaseId;
use nyaya_core::errors::DomainError;
use nyaya_core::repositories::AuditLogRepository;

use crate::database::errors::{column, map_sqlx_error};

/// Insert one entry on a connection that belongs to an open transaction
pub(crate) async fn append(conn: &mut MySqlConnection, entry: &AuditLog) -> Result<(), DomainError> {
    let details = serde_json::to_string(&entry.details).map_err(|e| DomainError::Internal {
        message: format!("Failed to serialize audit details: {}", e),
    })?;

    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, case_id, actor_id, action_type, details, `timestamp`)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.id.to_string())
    .bind(entry.case_id)
    .bind(entry.actor_id)
    .bind(entry.action.as_str())
    .bind(details)
    .bind(entry.timestamp)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error(e, "audit log"))?;

    Ok(())
}

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_audit_log(row: &MySqlRow) -> Result<AuditLog, DomainError> {
        let id: String = column(row, "id")?;
        let action: String = column(row, "action_type")?;
        let details: JsonValue = column(row, "details")?;

        Ok(AuditLog {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            case_id: column(row, "case_id")?,
            actor_id: column(row, "actor_id")?,
            action: AuditAction::from_str(&action).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown action type: {}", action),
            })?,
            details,
            timestamp: column::<DateTime<Utc>>(row, "timestamp")?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<AuditLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, case_id, actor_id, action_type, details, `timestamp`
            FROM audit_logs
            WHERE case_id = ?
            ORDER BY `timestamp` ASC, id ASC
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "audit log"))?;

        rows.iter().map(Self::row_to_audit_log).collect()
    }
}
