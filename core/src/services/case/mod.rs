//! Firm-scoped reads of cases, tasks and documents.

mod service;

pub use service::CaseService;
