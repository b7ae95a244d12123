//! MySQL implementation of the UserRepository trait.
//!
//! Credential resets and role changes commit together with their audit
//! entry or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use std::str::FromStr;

use nyaya_core::domain::entities::audit::AuditLog;
use nyaya_core::domain::entities::user::{NewUser, Role, User, UserId};
use nyaya_core::errors::DomainError;
use nyaya_core::repositories::UserRepository;

use super::audit_repository_impl::append;
use crate::database::errors::{column, map_sqlx_error};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let role: String = column(row, "role")?;

        Ok(User {
            id: column(row, "id")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            role: Role::from_str(&role).map_err(|_| DomainError::Internal {
                message: format!("Unknown role stored for user: {}", role),
            })?,
            firm_id: column(row, "firm_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

fn user_not_found() -> DomainError {
    DomainError::NotFound {
        resource: "user".to_string(),
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, firm_id, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, firm_id, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, role, firm_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.firm_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "email"))?;

        Ok(User {
            id: result.last_insert_id() as UserId,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            firm_id: user.firm_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn reset_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
        audit: &AuditLog,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, "user"))?;

        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "user"))?;
        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        append(&mut *tx, audit).await?;

        tx.commit().await.map_err(|e| DomainError::CommitUnknown {
            message: format!("credential reset commit failed: {}", e),
        })
    }

    async fn update_role(&self, id: UserId, role: Role, audit: &AuditLog) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, "user"))?;

        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "user"))?;
        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        append(&mut *tx, audit).await?;

        tx.commit().await.map_err(|e| DomainError::CommitUnknown {
            message: format!("role change commit failed: {}", e),
        })
    }
}
