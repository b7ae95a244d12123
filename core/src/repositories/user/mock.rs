//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::user::{NewUser, Role, User, UserId};
use crate::errors::DomainError;
use crate::repositories::audit::mock::SharedAuditLog;
use crate::repositories::audit::MockAuditLogRepository;

use super::UserRepository;

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    audit: SharedAuditLog,
}

impl MockUserRepository {
    /// Create a new mock repository with its own private audit log
    pub fn new() -> Self {
        Self::with_audit_log(&MockAuditLogRepository::new())
    }

    /// Create a mock whose audited writes land in `audit`
    pub fn with_audit_log(audit: &MockAuditLogRepository) -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            audit: audit.shared(),
        }
    }

    /// Insert a user directly, bypassing uniqueness checks
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.get(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                resource: "email".to_string(),
            });
        }

        let now = Utc::now();
        let id = users.keys().max().copied().unwrap_or(0) + 1;
        let stored = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            firm_id: user.firm_id,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn reset_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
        audit: &AuditLog,
    ) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "user".to_string(),
        })?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        self.audit.lock().unwrap().push(audit.clone());
        Ok(())
    }

    async fn update_role(&self, id: UserId, role: Role, audit: &AuditLog) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "user".to_string(),
        })?;
        user.role = role;
        user.updated_at = Utc::now();
        self.audit.lock().unwrap().push(audit.clone());
        Ok(())
    }
}
