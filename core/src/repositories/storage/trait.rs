//! Durable storage for raw evidence bytes.

use async_trait::async_trait;

use crate::domain::value_objects::{DurableArtifact, StorageKey};
use crate::errors::DomainError;

/// Backend holding the bytes that document rows point at.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `bytes` under `key` and return only once they are on stable
    /// storage. Writing the same key again replaces the artifact.
    async fn persist(&self, key: &StorageKey, bytes: &[u8]) -> Result<DurableArtifact, DomainError>;

    /// Remove an artifact. A missing artifact is not an error.
    async fn discard(&self, key: &StorageKey) -> Result<(), DomainError>;

    /// Client-visible reference for an artifact
    fn location(&self, key: &StorageKey) -> String;
}
