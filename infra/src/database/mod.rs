//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository pattern implementations
//! - Transaction support
//! - Database migrations

pub mod connection;
pub(crate) mod errors;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAuditLogRepository, MySqlCaseRepository, MySqlEvidenceRepository, MySqlUserRepository,
};
