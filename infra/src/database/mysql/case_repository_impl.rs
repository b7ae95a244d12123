//! MySQL implementation of the CaseRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use nyaya_core::domain::entities::case::{Case, CaseId, Task};
use nyaya_core::domain::entities::user::FirmId;
use nyaya_core::errors::DomainError;
use nyaya_core::repositories::CaseRepository;

use crate::database::errors::{column, map_sqlx_error};

pub struct MySqlCaseRepository {
    pool: MySqlPool,
}

impl MySqlCaseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_case(row: &MySqlRow) -> Result<Case, DomainError> {
        Ok(Case {
            id: column(row, "id")?,
            firm_id: column(row, "firm_id")?,
            title: column(row, "title")?,
            status: column(row, "status")?,
            created_at: column::<Option<DateTime<Utc>>>(row, "created_at")?,
        })
    }

    // due_date is read as text so zero dates decode to None instead of failing
    fn row_to_task(row: &MySqlRow) -> Result<Task, DomainError> {
        let due_date: Option<String> = column(row, "due_date")?;

        Ok(Task {
            id: column(row, "id")?,
            case_id: column(row, "case_id")?,
            title: column(row, "title")?,
            status: column(row, "status")?,
            due_date: Task::parse_due_date(due_date.as_deref()),
        })
    }
}

#[async_trait]
impl CaseRepository for MySqlCaseRepository {
    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, DomainError> {
        let row = sqlx::query("SELECT id, firm_id, title, status, created_at FROM cases WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "case"))?;

        row.as_ref().map(Self::row_to_case).transpose()
    }

    async fn find_by_firm(&self, firm_id: FirmId) -> Result<Vec<Case>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, firm_id, title, status, created_at
            FROM cases
            WHERE firm_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(firm_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "case"))?;

        rows.iter().map(Self::row_to_case).collect()
    }

    async fn find_all(&self) -> Result<Vec<Case>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, firm_id, title, status, created_at
            FROM cases
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "case"))?;

        rows.iter().map(Self::row_to_case).collect()
    }

    async fn find_tasks(&self, case_id: CaseId) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, case_id, title, status, CAST(due_date AS CHAR) AS due_date
            FROM tasks
            WHERE case_id = ?
            ORDER BY tasks.due_date IS NULL OR tasks.due_date = '0000-00-00',
                     tasks.due_date ASC, tasks.id ASC
            "#,
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "task"))?;

        rows.iter().map(Self::row_to_task).collect()
    }
}
