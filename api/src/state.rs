//! Shared application state handed to every handler

use std::sync::Arc;

use futures_util::future::{self, BoxFuture};

use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_core::services::{
    AuditTrailService, AuthService, CaseService, EvidenceIntakeService, TokenService,
};
use nyaya_infra::DatabasePool;

/// Application state that holds shared services
pub struct AppState<U, C, E, A, S>
where
    U: UserRepository,
    C: CaseRepository,
    E: EvidenceRepository,
    A: AuditLogRepository,
    S: ArtifactStore,
{
    pub auth_service: Arc<AuthService<U>>,
    pub case_service: Arc<CaseService<C, E>>,
    pub evidence_service: Arc<EvidenceIntakeService<C, E, S>>,
    pub audit_service: Arc<AuditTrailService<C, A>>,
    /// Used by the bearer middleware on protected routes
    pub token_service: Arc<TokenService>,
    pub health: Arc<dyn HealthProbe>,
}

/// Liveness of the backing datastore
pub trait HealthProbe: Send + Sync {
    fn is_healthy(&self) -> BoxFuture<'_, bool>;
}

impl HealthProbe for DatabasePool {
    fn is_healthy(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.health_check())
    }
}

/// Fixed answer, for wiring the app without a database
#[derive(Debug, Clone, Copy)]
pub struct StaticHealth(pub bool);

impl HealthProbe for StaticHealth {
    fn is_healthy(&self) -> BoxFuture<'_, bool> {
        Box::pin(future::ready(self.0))
    }
}
