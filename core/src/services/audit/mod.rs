//! Audit trail read service.

mod service;

pub use service::AuditTrailService;
