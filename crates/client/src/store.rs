//! Pluggable credential storage.
//!
//! The mobile app keeps its session in the platform's secure store. Here
//! that primitive is the [`CredentialStore`] trait, with an in-memory
//! implementation and a JSON file implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt credential file: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value storage for session credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a key. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Store backed by a JSON object on disk, rewritten on every mutation.
///
/// A missing file reads as empty. Writes go to a sibling temp file that is
/// renamed over the original, and on Unix the file is only readable by its
/// owner. A file that no longer parses is reported by `get` and replaced by
/// `set` and `delete`, so logging out always succeeds.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries to modify, and whether the file must be rewritten even if
    /// nothing changes because its contents were unreadable.
    async fn load_for_update(&self) -> Result<(HashMap<String, String>, bool), StoreError> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(StoreError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable credential file",
                );
                Ok((HashMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;

        let temp = self.temp_path();
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&temp).await?;
        // A temp file left by an earlier crash keeps its old mode.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
        }
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.load_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.load_for_update().await?;
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::SessionStore;

    #[tokio::test]
    async fn memory_store_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStore::new(&path).set("access_token", "abc").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("access_token").await.unwrap().as_deref(),
            Some("abc")
        );

        reopened.delete("access_token").await.unwrap();
        assert_eq!(FileStore::new(&path).get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("user_id").await.unwrap(), None);
        store.delete("user_id").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn file_store_reports_corrupt_file_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = FileStore::new(&path).get("k").await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    // ---- Test: a truncated session file does not block logout or login ----

    #[tokio::test]
    async fn logout_clears_truncated_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, br#"{"access_token":"tok","user_role":"far"#).unwrap();

        let sessions = SessionStore::new(Arc::new(FileStore::new(&path)));
        sessions.clear().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("tok"));
        assert_eq!(sessions.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_truncated_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{\"access_token\":").unwrap();

        let store = FileStore::new(&path);
        store.set("user_role", "farmer").await.unwrap();

        assert_eq!(store.get("user_role").await.unwrap().as_deref(), Some("farmer"));
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);
        store.set("access_token", "abc").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        // Stale temp file with permissive bits from an interrupted write.
        let temp = dir.path().join("session.json.tmp");
        std::fs::write(&temp, b"{}").unwrap();
        std::fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o644)).unwrap();

        FileStore::new(&path).set("access_token", "secret").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "credential file mode is {mode:o}");
    }
}
