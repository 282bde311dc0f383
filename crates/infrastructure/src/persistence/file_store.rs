//! File-backed key-value store.
//!
//! Each key is stored as `<dir>/<key>.json`. The default directory is the
//! platform config directory:
//! - Linux: ~/.config/courier
//! - macOS: ~/Library/Application Support/courier
//! - Windows: %APPDATA%/courier

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use courier_application::ports::{KeyValueStore, StoreError};

use crate::serialization::{from_json, to_json_stable};

/// Returns the default data directory, if the platform has one.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("courier"))
}

/// Key-value store writing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or could escape the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;

        // Valid JSON is reformatted so files diff cleanly; anything else is kept as is.
        let content = match from_json::<Value>(value) {
            Ok(json) => {
                to_json_stable(&json).map_err(|e| StoreError::Serialization(e.to_string()))?
            }
            Err(_) => value.to_string(),
        };

        fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_data_dir_is_named() {
        if let Some(dir) = default_data_dir() {
            assert!(dir.ends_with("courier"));
        }
    }

    #[test]
    fn test_key_validation() {
        let store = FileKeyValueStore::new("/tmp/courier");
        assert!(store.path_for("courier.history").is_ok());
        for key in ["", "../x", "a/b", ".hidden", "a b"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path().join("nested"));

        assert_eq!(store.get("courier.theme").await.unwrap(), None);

        store.put("courier.theme", r#""dark""#).await.unwrap();
        assert_eq!(
            store.get("courier.theme").await.unwrap().as_deref(),
            Some("\"dark\"\n")
        );

        store.remove("courier.theme").await.unwrap();
        assert_eq!(store.get("courier.theme").await.unwrap(), None);
        store.remove("courier.theme").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_is_written_stable() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());

        store.put("courier.user", r#"{"name":"Ann","email":"a@b.c"}"#).await.unwrap();
        let on_disk = std::fs::read_to_string(temp.path().join("courier.user.json")).unwrap();
        assert_eq!(on_disk, "{\n  \"name\": \"Ann\",\n  \"email\": \"a@b.c\"\n}\n");
    }

    #[tokio::test]
    async fn test_non_json_is_written_verbatim() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());

        store.put("notes", "not json").await.unwrap();
        assert_eq!(store.get("notes").await.unwrap().as_deref(), Some("not json"));
    }
}
