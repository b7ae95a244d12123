//! Read access to cases and tasks.

use async_trait::async_trait;

use crate::domain::entities::case::{Case, CaseId, Task};
use crate::domain::entities::user::FirmId;
use crate::errors::DomainError;

#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, DomainError>;

    /// Cases owned by a firm, newest first
    async fn find_by_firm(&self, firm_id: FirmId) -> Result<Vec<Case>, DomainError>;

    /// Every case across firms, newest first. Only reachable through the
    /// system-role bypass.
    async fn find_all(&self) -> Result<Vec<Case>, DomainError>;

    /// Tasks attached to a case, ordered by due date with undated tasks last
    async fn find_tasks(&self, case_id: CaseId) -> Result<Vec<Task>, DomainError>;
}
