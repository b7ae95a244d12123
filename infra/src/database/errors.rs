//! Translation of SQLx failures into the domain error taxonomy.

use sqlx::error::ErrorKind;
use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};

use nyaya_core::errors::DomainError;

/// Map a SQLx error raised while working on `resource`.
///
/// Pool exhaustion and I/O become retryable `TransientStorage`, duplicate
/// keys become `Conflict`, foreign-key violations become `Integrity`.
pub(crate) fn map_sqlx_error(err: sqlx::Error, resource: &str) -> DomainError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(resource, error = %err, "Database unavailable");
            DomainError::TransientStorage {
                message: format!("{} store unavailable", resource),
            }
        }
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation => DomainError::Conflict {
                resource: resource.to_string(),
            },
            ErrorKind::ForeignKeyViolation => DomainError::Integrity {
                message: format!("{} references a missing row", resource),
            },
            _ => DomainError::Internal {
                message: format!("{} query failed: {}", resource, err),
            },
        },
        _ => DomainError::Internal {
            message: format!("{} query failed: {}", resource, err),
        },
    }
}

/// Read one column, reporting decode failures as `Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}
