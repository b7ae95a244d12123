//! Storage keys addressing evidence artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::errors::ValidationError;

const MAX_EXTENSION_LEN: usize = 10;
const MAX_KEY_LEN: usize = 255;

/// Name of an artifact inside the storage backend.
///
/// Keys are flat (no path separators) and limited to ASCII
/// alphanumerics, `-` and `.`, so they are safe as file names and
/// object-store keys alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Fresh key of the form `<unix-millis>-<uuid><.ext>`
    pub fn generate(original_filename: Option<&str>, now: DateTime<Utc>) -> Self {
        let extension = original_filename
            .and_then(sanitized_extension)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        Self(format!(
            "{}-{}{}",
            now.timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        ))
    }

    /// Accept a key read back from storage or a request
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_KEY_LEN
            && !raw.starts_with('.')
            && !raw.contains("..")
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::invalid("storage_key"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitized_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > MAX_EXTENSION_LEN || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keeps_sanitized_extension() {
        let now = Utc::now();
        let key = StorageKey::generate(Some("Scan Of Deed.PDF"), now);

        assert!(key.as_str().starts_with(&format!("{}-", now.timestamp_millis())));
        assert_eq!(key.extension(), Some("pdf"));
        assert!(StorageKey::parse(key.as_str()).is_ok());
    }

    #[test]
    fn test_generate_drops_suspicious_extension() {
        let now = Utc::now();
        assert_eq!(StorageKey::generate(Some("evil.ph/p"), now).extension(), None);
        assert_eq!(StorageKey::generate(Some("noext"), now).extension(), None);
        assert_eq!(StorageKey::generate(Some("long.abcdefghijklmnop"), now).extension(), None);
        assert_eq!(StorageKey::generate(None, now).extension(), None);
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let now = Utc::now();
        assert_ne!(
            StorageKey::generate(Some("a.jpg"), now),
            StorageKey::generate(Some("a.jpg"), now)
        );
    }

    #[test]
    fn test_parse_rejects_traversal() {
        assert!(StorageKey::parse("../etc/passwd").is_err());
        assert!(StorageKey::parse("a/b.jpg").is_err());
        assert!(StorageKey::parse(".hidden").is_err());
        assert!(StorageKey::parse("").is_err());
        assert!(StorageKey::parse("1700000000000-abc.jpg").is_ok());
    }
}
