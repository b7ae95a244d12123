//! Uploaded artifacts before and after they reach durable storage.

use super::storage_key::StorageKey;

/// Bytes received from a client, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingArtifact {
    /// Client-supplied file name; only its extension is ever used
    pub original_filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl PendingArtifact {
    pub fn new(original_filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { original_filename, bytes }
    }

    /// Declared size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Proof that an artifact's bytes are durable under `key`.
///
/// Only an `ArtifactStore` implementation should construct this, and only
/// after its write has been flushed to stable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurableArtifact {
    key: StorageKey,
    size_bytes: u64,
}

impl DurableArtifact {
    pub fn confirmed(key: StorageKey, size_bytes: u64) -> Self {
        Self { key, size_bytes }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}
