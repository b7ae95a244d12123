//! Artifact store on the local filesystem.
//!
//! A write goes to `<key>.part`, is fsynced, renamed over `<key>` and the
//! directory is fsynced, so a returned [`DurableArtifact`] survives a crash.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use nyaya_core::domain::value_objects::{DurableArtifact, StorageKey};
use nyaya_core::errors::DomainError;
use nyaya_core::repositories::ArtifactStore;
use nyaya_shared::StorageConfig;

use crate::InfrastructureError;

pub struct LocalDiskArtifactStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalDiskArtifactStore {
    /// Open the store, creating the upload directory if needed
    pub fn new(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        fs::create_dir_all(&config.upload_dir)?;
        tracing::info!(dir = %config.upload_dir.display(), "Artifact store ready");
        Ok(Self {
            root: config.upload_dir.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

fn write_durable(root: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    let result = (|| {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        sync_directory(root)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn remove_durable(root: &Path, path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => sync_directory(root),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn sync_directory(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn storage_error(action: &str, err: impl std::fmt::Display) -> DomainError {
    tracing::error!(action, error = %err, "Artifact store failure");
    DomainError::TransientStorage {
        message: format!("artifact {} failed", action),
    }
}

#[async_trait]
impl ArtifactStore for LocalDiskArtifactStore {
    async fn persist(&self, key: &StorageKey, bytes: &[u8]) -> Result<DurableArtifact, DomainError> {
        let root = self.root.clone();
        let path = self.path_for(key);
        let data = bytes.to_vec();
        let size = data.len() as u64;

        tokio::task::spawn_blocking(move || write_durable(&root, &path, &data))
            .await
            .map_err(|e| storage_error("write", e))?
            .map_err(|e| storage_error("write", e))?;

        Ok(DurableArtifact::confirmed(key.clone(), size))
    }

    async fn discard(&self, key: &StorageKey) -> Result<(), DomainError> {
        let root = self.root.clone();
        let path = self.path_for(key);

        tokio::task::spawn_blocking(move || remove_durable(&root, &path))
            .await
            .map_err(|e| storage_error("discard", e))?
            .map_err(|e| storage_error("discard", e))
    }

    fn location(&self, key: &StorageKey) -> String {
        format!("{}/{}", self.public_prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalDiskArtifactStore {
        LocalDiskArtifactStore::new(&StorageConfig {
            upload_dir: dir.path().join("uploads"),
            public_prefix: "/uploads/".to_string(),
            max_upload_bytes: 1024,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_persist_writes_final_file_only() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let key = StorageKey::generate(Some("scan.pdf"), Utc::now());

        let artifact = store.persist(&key, b"evidence").await.unwrap();

        assert_eq!(artifact.size_bytes(), 8);
        assert_eq!(artifact.key(), &key);
        let uploads = dir.path().join("uploads");
        assert_eq!(fs::read(uploads.join(key.as_str())).unwrap(), b"evidence");
        assert!(!uploads.join(format!("{}.part", key)).exists());
    }

    #[tokio::test]
    async fn test_persist_same_key_twice_replaces() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let key = StorageKey::generate(None, Utc::now());

        store.persist(&key, b"first").await.unwrap();
        store.persist(&key, b"second").await.unwrap();

        let stored = fs::read(dir.path().join("uploads").join(key.as_str())).unwrap();
        assert_eq!(stored, b"second");
    }

    #[tokio::test]
    async fn test_discard_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let key = StorageKey::generate(Some("a.png"), Utc::now());
        store.persist(&key, b"x").await.unwrap();

        store.discard(&key).await.unwrap();
        store.discard(&key).await.unwrap();

        assert!(!dir.path().join("uploads").join(key.as_str()).exists());
    }

    #[test]
    fn test_location_uses_public_prefix() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let key = StorageKey::parse("1700000000000-abc.jpg").unwrap();

        assert_eq!(store.location(&key), "/uploads/1700000000000-abc.jpg");
    }
}
