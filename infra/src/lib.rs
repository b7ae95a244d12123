//! # Infrastructure Layer
//!
//! Concrete adapters behind the `nyaya_core` repository traits:
//!
//! - **Database**: MySQL repositories on a SQLx pool, including the
//!   transaction-scoped audit appender
//! - **Storage**: local-disk artifact store with fsync-before-return writes
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Artifact storage backends
pub mod storage;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlAuditLogRepository, MySqlCaseRepository, MySqlEvidenceRepository,
    MySqlUserRepository, PoolStatistics,
};
pub use storage::LocalDiskArtifactStore;

/// Infrastructure-specific error types, raised during startup
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error preparing artifact storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
