//! In-memory ArtifactStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::value_objects::{DurableArtifact, StorageKey};
use crate::errors::DomainError;

use super::ArtifactStore;

#[derive(Clone, Default)]
pub struct MockArtifactStore {
    artifacts: Arc<Mutex<HashMap<StorageKey, Vec<u8>>>>,
    persist_calls: Arc<Mutex<usize>>,
    fail_persist: Arc<Mutex<bool>>,
    fail_discard: Arc<Mutex<bool>>,
}

impl MockArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_persist(&self, fail: bool) {
        *self.fail_persist.lock().unwrap() = fail;
    }

    pub fn set_fail_discard(&self, fail: bool) {
        *self.fail_discard.lock().unwrap() = fail;
    }

    /// Number of persist attempts, including failed ones
    pub fn persist_calls(&self) -> usize {
        *self.persist_calls.lock().unwrap()
    }

    pub fn keys(&self) -> Vec<StorageKey> {
        self.artifacts.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, key: &StorageKey) -> Option<Vec<u8>> {
        self.artifacts.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ArtifactStore for MockArtifactStore {
    async fn persist(&self, key: &StorageKey, bytes: &[u8]) -> Result<DurableArtifact, DomainError> {
        *self.persist_calls.lock().unwrap() += 1;
        if *self.fail_persist.lock().unwrap() {
            return Err(DomainError::TransientStorage {
                message: "mock store unavailable".to_string(),
            });
        }
        self.artifacts
            .lock()
            .unwrap()
            .insert(key.clone(), bytes.to_vec());
        Ok(DurableArtifact::confirmed(key.clone(), bytes.len() as u64))
    }

    async fn discard(&self, key: &StorageKey) -> Result<(), DomainError> {
        if *self.fail_discard.lock().unwrap() {
            return Err(DomainError::TransientStorage {
                message: "mock store unavailable".to_string(),
            });
        }
        self.artifacts.lock().unwrap().remove(key);
        Ok(())
    }

    fn location(&self, key: &StorageKey) -> String {
        format!("/uploads/{}", key)
    }
}
