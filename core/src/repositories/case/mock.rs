//! Mock implementation of CaseRepository for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::case::{Case, CaseId, Task};
use crate::domain::entities::user::FirmId;
use crate::errors::DomainError;

use super::CaseRepository;

#[derive(Clone, Default)]
pub struct MockCaseRepository {
    cases: Arc<Mutex<Vec<Case>>>,
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl MockCaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a case
    pub fn add_case(&self, id: CaseId, firm_id: FirmId, title: &str) {
        self.cases.lock().unwrap().push(Case {
            id,
            firm_id,
            title: title.to_string(),
            status: "open".to_string(),
            created_at: None,
        });
    }

    /// Seed a task
    pub fn add_task(&self, task: Task) {
        self.tasks.lock().unwrap().push(task);
    }
}

fn newest_first(mut cases: Vec<Case>) -> Vec<Case> {
    cases.sort_by(|a, b| b.id.cmp(&a.id));
    cases
}

#[async_trait]
impl CaseRepository for MockCaseRepository {
    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, DomainError> {
        Ok(self.cases.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_firm(&self, firm_id: FirmId) -> Result<Vec<Case>, DomainError> {
        let cases = self.cases.lock().unwrap();
        Ok(newest_first(
            cases.iter().filter(|c| c.firm_id == firm_id).cloned().collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Case>, DomainError> {
        Ok(newest_first(self.cases.lock().unwrap().clone()))
    }

    async fn find_tasks(&self, case_id: CaseId) -> Result<Vec<Task>, DomainError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.case_id == case_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
        Ok(tasks)
    }
}
