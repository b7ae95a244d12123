//! MySQL implementations of the core repository traits

pub(crate) mod audit_repository_impl;
mod case_repository_impl;
mod evidence_repository_impl;
mod user_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use case_repository_impl::MySqlCaseRepository;
pub use evidence_repository_impl::MySqlEvidenceRepository;
pub use user_repository_impl::MySqlUserRepository;
